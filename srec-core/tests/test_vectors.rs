//! Reference S-record files in the three common address layouts

use srec_core::{decoder::decode_record, scanner::Scanner, RecordKind};

/// S19-style file, 16-bit addresses
const S19: &[&str] = &[
    "S00F000068656C6C6F202020202000003C",
    "S11F00007C0802A6900100049421FFF07C6C1B787C8C23783C6000003863000026",
    "S11F001C4BFFFFE5398000007D83637880010014382100107C0803A64E800020E9",
    "S111003848656C6C6F20776F726C642E0A0042",
    "S5030003F9",
    "S9030000FC",
];

/// S28-style file, 24-bit addresses
const S28: &[&str] = &[
    "S00F000068656C6C6F202020202000003C",
    "S2200000007C0802A6900100049421FFF07C6C1B787C8C23783C6000003863000025",
    "S22000001C4BFFFFE5398000007D83637880010014382100107C0803A64E800020E8",
    "S21200003848656C6C6F20776F726C642E0A0041",
    "S5030003F9",
    "S804000000FB",
];

/// S37-style file, 32-bit addresses
const S37: &[&str] = &[
    "S00F000068656C6C6F202020202000003C",
    "S321000000007C0802A6900100049421FFF07C6C1B787C8C23783C6000003863000024",
    "S3210000001C4BFFFFE5398000007D83637880010014382100107C0803A64E800020E7",
    "S3130000003848656C6C6F20776F726C642E0A0040",
    "S5030003F9",
    "S70500000000FA",
];

/// Miscellaneous data records
const MISC: &[&str] = &[
    "S11301007A07000FFF0E7A00000001627A01000FE7",
    "S11300001285F245F2212226A00042429000823756",
    "S2140C040021002C0000000000180000000000000670",
    "S315CAFE0120AA55AA55AA55AA55AA55AA55AA55AA5509",
];

fn check_lines(lines: &[&str]) {
    for (i, line) in lines.iter().enumerate() {
        let record = decode_record(line).unwrap_or_else(|e| panic!("{}) {}: {}", i, line, e));

        assert_eq!(&record.encode(), line, "{}) re-encode", i);
        assert!(record.verify(), "{}) checksum", i);
        assert_eq!(
            format!("{:02X}", record.compute_checksum()),
            &line[line.len() - 2..],
            "{}) computed checksum",
            i
        );
        assert_eq!(
            record.length as usize,
            record.kind.address_width() + record.data.len() + 1,
            "{}) length invariant",
            i
        );
    }
}

#[test]
fn test_s19_file() {
    check_lines(S19);
}

#[test]
fn test_s28_file() {
    check_lines(S28);
}

#[test]
fn test_s37_file() {
    check_lines(S37);
}

#[test]
fn test_misc_records() {
    check_lines(MISC);
}

#[test]
fn test_scan_joined_files() {
    let all: Vec<&str> = [S19, S28, S37, MISC].concat();
    let joined = all.join("\n");

    let records: Vec<_> = Scanner::new(joined.as_bytes())
        .map(|r| r.unwrap())
        .collect();

    assert_eq!(records.len(), all.len());
    for (record, line) in records.iter().zip(&all) {
        assert_eq!(&record.encode(), line);
    }

    let terminations: Vec<RecordKind> = records
        .iter()
        .filter(|r| r.kind.is_termination())
        .map(|r| r.kind)
        .collect();
    assert_eq!(terminations, [RecordKind::S9, RecordKind::S8, RecordKind::S7]);
}

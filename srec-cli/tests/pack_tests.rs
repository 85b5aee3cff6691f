use std::fs;
use tempfile::tempdir;

use srec_cli::{commands::pack, Layout};
use srec_core::{scanner::Scanner, Record, RecordKind};

fn read_records<P: AsRef<std::path::Path>>(p: P) -> Vec<Record> {
    let text = fs::read(p).unwrap();
    Scanner::new(&text[..])
        .collect::<Result<_, _>>()
        .unwrap()
}

#[test]
fn pack_s19_with_header() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("image.bin");
    let out_path = td.path().join("image.s19");

    let image: Vec<u8> = (0..=255u8).collect();
    fs::write(&in_path, &image).unwrap();

    pack::execute(
        in_path.to_str().unwrap(),
        out_path.to_str().unwrap(),
        &pack::PackOptions {
            header: Some("hello".to_string()),
            ..Default::default()
        },
    )
    .unwrap();

    let records = read_records(&out_path);

    // header + 8 data + count + termination
    assert_eq!(records.len(), 11);
    assert_eq!(records[0].kind, RecordKind::S0);
    assert_eq!(records[0].data.as_ref(), b"hello");
    assert!(records[1..9].iter().all(|r| r.kind == RecordKind::S1));
    assert_eq!(records[9].count_value(), Some(8));
    assert_eq!(records[10].kind, RecordKind::S9);
    assert!(records.iter().all(Record::verify));

    let rebuilt: Vec<u8> = records[1..9]
        .iter()
        .flat_map(|r| r.data.iter().copied())
        .collect();
    assert_eq!(rebuilt, image);
}

#[test]
fn pack_s37_at_load_address_with_crlf() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("fw.bin");
    let out_path = td.path().join("fw.s37");

    fs::write(&in_path, vec![0xA5u8; 100]).unwrap();

    pack::execute(
        in_path.to_str().unwrap(),
        out_path.to_str().unwrap(),
        &pack::PackOptions {
            layout: Layout::S37,
            address: 0x0800_0000,
            record_size: 16,
            header: None,
            crlf: true,
        },
    )
    .unwrap();

    let text = fs::read_to_string(&out_path).unwrap();
    assert!(text.ends_with("\r\n"));

    let records = read_records(&out_path);
    // 7 data + count + termination
    assert_eq!(records.len(), 9);
    assert_eq!(records[0].kind, RecordKind::S3);
    assert_eq!(records[0].address, 0x0800_0000);
    assert_eq!(records[6].address, 0x0800_0060);
    assert_eq!(records[6].data.len(), 4);
    assert_eq!(records[8].kind, RecordKind::S7);
    assert_eq!(records[8].address, 0x0800_0000);
}

#[test]
fn pack_rejects_image_beyond_address_space() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("big.bin");
    let out_path = td.path().join("big.s19");

    fs::write(&in_path, vec![0u8; 64]).unwrap();

    let result = pack::execute(
        in_path.to_str().unwrap(),
        out_path.to_str().unwrap(),
        &pack::PackOptions {
            address: 0xFFF0,
            ..Default::default()
        },
    );
    assert!(result.is_err());
}

#[test]
fn pack_rejects_oversized_records() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("in.bin");
    let out_path = td.path().join("out.s28");

    fs::write(&in_path, [1u8, 2, 3]).unwrap();

    for record_size in [0usize, 252] {
        let result = pack::execute(
            in_path.to_str().unwrap(),
            out_path.to_str().unwrap(),
            &pack::PackOptions {
                layout: Layout::S28,
                record_size,
                ..Default::default()
            },
        );
        assert!(result.is_err(), "record size {} should be rejected", record_size);
    }
}

#[test]
fn pack_empty_input() {
    let td = tempdir().unwrap();
    let in_path = td.path().join("empty.bin");
    let out_path = td.path().join("empty.s28");

    fs::write(&in_path, b"").unwrap();

    pack::execute(
        in_path.to_str().unwrap(),
        out_path.to_str().unwrap(),
        &pack::PackOptions {
            layout: Layout::S28,
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(
        fs::read_to_string(&out_path).unwrap(),
        "S5030000FC\nS804000000FB\n"
    );
}

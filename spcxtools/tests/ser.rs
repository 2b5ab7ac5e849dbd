use spcxtools::cfg::{Column, Export};
use spcxtools::{de, ser};

mod common;
use common::*;

fn tsv_string(words: &[u32], export: &Export) -> String {
    let spcx = de::spcx(&*bytes(words)).unwrap();
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .from_writer(Vec::new());
    ser::tsv(&mut wtr, &spcx, export).unwrap();
    String::from_utf8(wtr.into_inner().unwrap()).unwrap()
}

#[test]
fn tsv_all_columns() {
    let out = tsv_string(&WITH_GAP, &Export::default());
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(6, lines.len());
    assert_eq!("0\t3\t47638\t1", lines[0]);
    assert_eq!("1\t6\t47325\t0", lines[2]);
    assert_eq!("2\t11\t47947\t0", lines[4]);
}

#[test]
fn tsv_selected_columns_and_channels() {
    let export = Export {
        columns: vec![Column::Time, Column::Channel],
        channels: vec![3],
    };
    let out = tsv_string(&WITH_OVERFLOW, &export);
    let expected = format!("{}\t3\n{}\t3\n{}\t3\n", 47638, 0x100_02AC, 0x200_03CC);
    assert_eq!(expected, out);
}

#[test]
fn summary() {
    let spcx = de::spcx(&*bytes(&WITH_OVERFLOW)).unwrap();
    let summary = ser::summary(&spcx);
    assert_eq!(2, summary.blocks);
    assert_eq!(7, summary.events);
    let last = &summary.per_block[1];
    assert_eq!(6, last.events);
    assert_eq!(0, last.gaps);
    assert_eq!(Some(0xFF_FA27), last.first_time);
    assert_eq!(Some(0x200_03CC), last.last_time);
}

#[test]
fn summary_json() {
    let spcx = de::spcx(&*bytes(&WITH_GAP)).unwrap();
    let mut b: Vec<u8> = Vec::new();
    ser::summary_json(&mut b, &spcx).unwrap();
    let v: serde_json::Value = serde_json::from_slice(&b).unwrap();
    assert_eq!(3, v["blocks"]);
    assert_eq!(6, v["events"]);
    assert_eq!(1, v["per_block"][2]["gaps"]);
    assert_eq!(TIME_PER_BIN, v["per_block"][0]["time_per_bin"]);
}

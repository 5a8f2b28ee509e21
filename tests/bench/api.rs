// Integration tests for the benchmark entry point `bench_files`.
//
//   - An empty file list benchmarks generated data
//   - Files are loaded as one table, or one by one with bench_separately
//   - Level ranges are capped at the HC maximum
//   - Dictionary files keep only their trailing 64 KiB
//   - Missing or empty files are reported as errors

use std::io::Write;

use lz4::bench::config::{BenchConfig, LZ4_MAX_DICT_SIZE};
use lz4::bench::{bench_files, load_dict_file, SYNTHETIC_SIZE};
use lz4::datagen::gen_buffer;

fn quiet_config() -> BenchConfig {
    let mut c = BenchConfig::default();
    c.set_nb_seconds(0).set_notification_level(0);
    c
}

fn make_temp_file(content: &[u8]) -> (tempfile::NamedTempFile, String) {
    let mut tmp = tempfile::NamedTempFile::new().expect("tmp file");
    tmp.write_all(content).expect("write tmp file");
    let path = tmp.path().to_str().unwrap().to_owned();
    (tmp, path)
}

// ── Generated data ────────────────────────────────────────────────────────────

#[test]
fn no_files_benchmarks_generated_data() {
    let results = bench_files(&[], -1, 1, None, 0.5, &quiet_config()).unwrap();
    let levels: Vec<i32> = results.iter().map(|r| r.c_level).collect();
    assert_eq!(levels, vec![-1, 0, 1]);
    for r in &results {
        assert_eq!(r.src_size, SYNTHETIC_SIZE);
        assert!(r.compressed_size > 0 && r.compressed_size < r.src_size);
    }
}

#[test]
fn compressibility_changes_the_ratio() {
    let low = bench_files(&[], 1, 1, None, 0.1, &quiet_config()).unwrap();
    let high = bench_files(&[], 1, 1, None, 0.9, &quiet_config()).unwrap();
    assert!(high[0].ratio > low[0].ratio);
}

// ── Files ─────────────────────────────────────────────────────────────────────

#[test]
fn file_table_is_one_dataset() {
    let (_a, pa) = make_temp_file(&gen_buffer(40_000, 0.5, 1));
    let (_b, pb) = make_temp_file(&gen_buffer(60_000, 0.5, 2));
    let results = bench_files(&[&pa, &pb], 9, 9, None, 0.5, &quiet_config()).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].src_size, 100_000);
}

#[test]
fn separate_files_each_get_results() {
    let (_a, pa) = make_temp_file(&gen_buffer(40_000, 0.5, 3));
    let (_b, pb) = make_temp_file(&gen_buffer(60_000, 0.5, 4));
    let mut config = quiet_config();
    config.set_bench_separately(true);
    let results = bench_files(&[&pa, &pb], 1, 1, None, 0.5, &config).unwrap();
    let sizes: Vec<usize> = results.iter().map(|r| r.src_size).collect();
    assert_eq!(sizes, vec![40_000, 60_000]);
}

#[test]
fn reversed_range_runs_first_level_only() {
    let (_f, p) = make_temp_file(&gen_buffer(20_000, 0.5, 5));
    let results = bench_files(&[&p], 6, 2, None, 0.5, &quiet_config()).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].c_level, 6);
}

#[test]
fn linked_blocks_with_dictionary() {
    let dict = gen_buffer(20_000, 0.5, 6);
    let (_d, pd) = make_temp_file(&dict);
    let (_f, p) = make_temp_file(&gen_buffer(50_000, 0.5, 7));
    let mut config = quiet_config();
    config.set_linked_blocks(true).set_block_size(8 * 1024);
    let results = bench_files(&[&p], 1, 4, Some(&pd), 0.5, &config).unwrap();
    assert_eq!(results.len(), 4);
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[test]
fn nonexistent_file_is_an_error() {
    assert!(bench_files(&["/nonexistent/lz4/input"], 1, 1, None, 0.5, &quiet_config()).is_err());
}

#[test]
fn one_bad_file_fails_separate_run() {
    let (_a, pa) = make_temp_file(&gen_buffer(10_000, 0.5, 8));
    let mut config = quiet_config();
    config.set_bench_separately(true);
    assert!(bench_files(&[&pa, "/nonexistent/lz4/input"], 1, 1, None, 0.5, &config).is_err());
}

#[test]
fn empty_dictionary_file_is_an_error() {
    let (_d, pd) = make_temp_file(&[]);
    assert!(load_dict_file(&pd).is_err());
    assert!(bench_files(&[], 1, 1, Some(&pd), 0.5, &quiet_config()).is_err());
}

#[test]
fn dictionary_at_exact_limit_is_kept_whole() {
    let dict = gen_buffer(LZ4_MAX_DICT_SIZE, 0.5, 9);
    let (_d, pd) = make_temp_file(&dict);
    assert_eq!(load_dict_file(&pd).unwrap(), dict);
}

use bench_report::{ResultTable, Summary};

const HEADER: &str = "pattern,size_kb,bw_directaccess,bw_binarysearch,bw_hash1,bw_hash16,\
lat_directaccess,lat_binarysearch,lat_hash1,lat_hash16";

fn data_file(name: &str) -> String {
    format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Builds a table from `(pattern, size_kb, bw_directaccess, lat_directaccess)` rows.
fn direct_access_table(rows: &[(&str, f64, f64, f64)]) -> ResultTable {
    let mut csv = HEADER.to_string();
    for (pattern, size, bw, lat) in rows {
        csv.push_str(&format!("\n{},{},{},1,1,1,{},1,1,1", pattern, size, bw, lat));
    }
    csv.push('\n');
    ResultTable::from_reader(csv.as_bytes()).unwrap()
}

#[test]
fn max_sequential_bandwidth() {
    let table = direct_access_table(&[("Sequential", 16., 9000., 1.5), ("Sequential", 64., 7000., 2.0)]);
    let summary = Summary::compute(&table);
    assert_eq!(summary.sequential_max_bandwidth, Some(9000.));
    assert_eq!(summary.sequential_min_latency, Some(1.5));
    assert_eq!(summary.random_max_bandwidth, None);
    assert_eq!(summary.random_max_latency, None);
    assert_eq!(summary.bandwidth_ratio, None);
    assert_eq!(summary.latency_ratio, None);
}

#[test]
fn degradation_ratios() {
    let table = direct_access_table(&[
        ("Sequential", 16., 9000., 1.5),
        ("Sequential", 64., 7000., 2.0),
        ("Random", 16., 4500., 3.0),
        ("Random", 64., 3000., 7.5),
    ]);
    let summary = Summary::compute(&table);
    assert_eq!(summary.random_max_bandwidth, Some(4500.));
    assert_eq!(summary.random_min_bandwidth, Some(3000.));
    assert_eq!(summary.random_max_latency, Some(7.5));
    assert_eq!(summary.bandwidth_ratio, Some(3.));
    assert_eq!(summary.latency_ratio, Some(5.));
}

#[test]
fn zero_random_bandwidth_skips_ratio() {
    let table = direct_access_table(&[
        ("Sequential", 16., 9000., 1.5),
        ("Random", 16., 0., 3.0),
        ("Random", 64., 0., 6.0),
    ]);
    let summary = Summary::compute(&table);
    assert_eq!(summary.random_min_bandwidth, Some(0.));
    assert_eq!(summary.bandwidth_ratio, None);
    assert_eq!(summary.latency_ratio, Some(4.));

    let text = summary.to_string();
    assert!(!text.contains("Bandwidth ratio"));
    assert!(text.contains("  Latency ratio: 4.0x\n"));
}

#[test]
fn zero_sequential_latency_skips_ratio() {
    let table = direct_access_table(&[("Sequential", 16., 9000., 0.), ("Random", 16., 4500., 3.0)]);
    let summary = Summary::compute(&table);
    assert_eq!(summary.latency_ratio, None);
    assert_eq!(summary.bandwidth_ratio, Some(2.));
    assert!(!summary.to_string().contains("Latency ratio"));
}

#[test]
fn empty_cell_is_skipped_by_extremes() {
    let csv = format!(
        "{}\nSequential,16,9000,1,1,1,1.5,1,1,1\nRandom,16,,1,1,1,3.0,1,1,1\nRandom,64,3000,1,1,1,6.0,1,1,1\n",
        HEADER
    );
    let summary = Summary::compute(&ResultTable::from_reader(csv.as_bytes()).unwrap());
    assert_eq!(summary.random_max_bandwidth, Some(3000.));
    assert_eq!(summary.random_min_bandwidth, Some(3000.));
    assert_eq!(summary.bandwidth_ratio, Some(3.));
    assert_eq!(summary.latency_ratio, Some(4.));
}

#[test]
fn summary_is_idempotent() {
    let first = Summary::compute(&ResultTable::load(data_file("benchmark_results.csv")).unwrap());
    let second = Summary::compute(&ResultTable::load(data_file("benchmark_results.csv")).unwrap());
    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn printed_block() {
    let summary = Summary::compute(&ResultTable::load(data_file("benchmark_results.csv")).unwrap());
    let separator = "=".repeat(70);
    let expected = format!(
        "{sep}\nSUMMARY STATISTICS\n{sep}\n\
         \nSequential Access - DirectAccessArray:\n  Max Bandwidth: 9000 MB/s\n  Min Latency: 1.5 cycles\n\
         \nRandom Access - DirectAccessArray:\n  Max Bandwidth: 5200 MB/s\n  Max Latency: 7.5 cycles\n\
         \nPerformance Degradation (Sequential vs Random):\n  Latency ratio: 5.0x\n\
         \n{sep}\n",
        sep = separator
    );
    assert_eq!(summary.to_string(), expected);
}

#[test]
fn empty_table_prints_nan() {
    let summary = Summary::compute(&ResultTable::default());
    assert_eq!(summary, Summary::default());
    let text = summary.to_string();
    assert!(text.contains("  Max Bandwidth: nan MB/s\n"));
    assert!(text.contains("  Min Latency: nan cycles\n"));
    assert!(!text.contains("ratio"));
}

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use sundash::data::derive::{cycle_fold, rolling_mean};
use sundash::data::filter::filter_range;
use sundash::data::loader::{load, load_reader, load_with_options, LoadOptions};
use sundash::data::model::{
    CellValue, CYCLE, DATE_FRAC, OBSERVATION_COLUMNS, ROLLING_AVG, TOTAL_SPOT_NUM, YEAR,
};
use sundash::data::{PipelineError, Table};
use sundash::pipeline::{cycle_series, smoothed_series, DataSource};

/// One row per month for 1749–2022, with a deterministic spot count.
fn monthly_rows() -> String {
    let mut out = String::new();
    for year in 1749..=2022 {
        for month in 1..=12 {
            let date_frac = year as f64 + (month as f64 - 0.5) / 12.0;
            let spots = ((year * 12 + month) % 173) as f64 + 0.5;
            out.push_str(&format!(
                "{year},{month},{date_frac:.3},{spots:.1},2.5,{},1\n",
                month + 10
            ));
        }
    }
    out
}

fn write_fixture(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn load_fixture(path: &Path) -> Table {
    load(path, &OBSERVATION_COLUMNS).unwrap()
}

fn years(table: &Table) -> Vec<f64> {
    table
        .numeric_values(YEAR)
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Range filter
// ---------------------------------------------------------------------------

#[test]
fn filtered_rows_respect_bounds_and_shrink_as_range_narrows() {
    let file = write_fixture(&monthly_rows());
    let table = load_fixture(file.path());

    let ranges = [(1749.0, 2022.0), (1800.0, 1950.0), (1850.0, 1900.0), (1875.0, 1875.0)];
    let mut previous = usize::MAX;
    for (low, high) in ranges {
        let out = filter_range(&table, YEAR, (low, high)).unwrap();
        assert!(years(&out).iter().all(|&y| low <= y && y <= high));
        assert!(out.len() <= previous);
        previous = out.len();
    }
}

#[test]
fn filtering_twice_changes_nothing() {
    let file = write_fixture(&monthly_rows());
    let table = load_fixture(file.path());

    let once = filter_range(&table, YEAR, (1900.0, 1910.0)).unwrap();
    let twice = filter_range(&once, YEAR, (1900.0, 1910.0)).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn single_year_selects_its_twelve_months() {
    let file = write_fixture(&monthly_rows());
    let table = load_fixture(file.path());

    let out = filter_range(&table, YEAR, (1800.0, 1800.0)).unwrap();
    assert_eq!(out.len(), 12);
    assert!(years(&out).iter().all(|&y| y == 1800.0));

    let none = filter_range(&table, YEAR, (1600.0, 1600.0)).unwrap();
    assert!(none.is_empty());
}

#[test]
fn filtering_preserves_stored_order() {
    let file = write_fixture(&monthly_rows());
    let table = load_fixture(file.path());

    let out = filter_range(&table, YEAR, (1950.0, 1960.0)).unwrap();
    let dates: Vec<f64> = out
        .numeric_values(DATE_FRAC)
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap())
        .collect();
    assert!(dates.windows(2).all(|w| w[0] <= w[1]));
}

// ---------------------------------------------------------------------------
// Rolling mean
// ---------------------------------------------------------------------------

#[test]
fn rolling_mean_of_five_years_with_window_three() {
    let rows = "1749,1,1749.042,10,0,1,1\n\
                1750,1,1750.042,20,0,1,1\n\
                1751,1,1751.042,30,0,1,1\n\
                1752,1,1752.042,40,0,1,1\n\
                1753,1,1753.042,50,0,1,1\n";
    let table = load_reader(rows.as_bytes(), &OBSERVATION_COLUMNS, &LoadOptions::default(), "rows")
        .unwrap();

    let out = rolling_mean(&table, TOTAL_SPOT_NUM, 3).unwrap();
    assert_eq!(
        out.column(ROLLING_AVG).unwrap().values,
        vec![
            CellValue::Null,
            CellValue::Null,
            CellValue::Float(20.0),
            CellValue::Float(30.0),
            CellValue::Float(40.0),
        ]
    );
}

#[test]
fn rolling_mean_keeps_length_and_fills_at_window_end() {
    let file = write_fixture(&monthly_rows());
    let table = filter_range(&load_fixture(file.path()), YEAR, (1900.0, 1905.0)).unwrap();
    let raw: Vec<f64> = table
        .numeric_values(TOTAL_SPOT_NUM)
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap())
        .collect();

    for k in [1usize, 2, 6, 13, 24] {
        let out = rolling_mean(&table, TOTAL_SPOT_NUM, k).unwrap();
        let avg = out.numeric_values(ROLLING_AVG).unwrap();
        assert_eq!(avg.len(), table.len());
        assert!(avg[..k - 1].iter().all(Option::is_none));

        let expected = raw[..k].iter().sum::<f64>() / k as f64;
        assert!((avg[k - 1].unwrap() - expected).abs() < 1e-9);
    }
}

// ---------------------------------------------------------------------------
// Cycle fold
// ---------------------------------------------------------------------------

#[test]
fn cycle_values_lie_in_half_open_period() {
    let file = write_fixture(&monthly_rows());
    let table = load_fixture(file.path());

    for cycle in [9.0, 10.3, 11.0, 12.9, 13.0] {
        let out = cycle_fold(&table, DATE_FRAC, cycle).unwrap();
        for v in out.numeric_values(CYCLE).unwrap() {
            let v = v.unwrap();
            assert!((0.0..cycle).contains(&v), "{v} outside [0, {cycle})");
        }
    }
}

#[test]
fn fractional_year_folds_by_remainder() {
    let table = load_reader(
        "0,1,25.4,1,0,1,1\n".as_bytes(),
        &OBSERVATION_COLUMNS,
        &LoadOptions::default(),
        "row",
    )
    .unwrap();
    let out = cycle_fold(&table, DATE_FRAC, 11.0).unwrap();
    let value = out.numeric_values(CYCLE).unwrap()[0].unwrap();
    assert!((value - 3.4).abs() < 1e-9);
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

#[test]
fn loaded_columns_reproduce_file_values() {
    let contents = monthly_rows();
    let file = write_fixture(&contents);
    let table = load_fixture(file.path());
    let selected = table.select(&OBSERVATION_COLUMNS).unwrap();

    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(selected.len(), lines.len());
    for (row, line) in lines.iter().enumerate().step_by(97) {
        for (col, field) in line.split(',').enumerate() {
            let expected: f64 = field.parse().unwrap();
            let actual = selected.columns()[col].values[row].as_f64().unwrap();
            assert_eq!(actual, expected, "row {row}, column {col}");
        }
    }
}

#[test]
fn wrong_name_count_is_schema_mismatch() {
    let file = write_fixture(&monthly_rows());
    let err = load(file.path(), &OBSERVATION_COLUMNS[..6]).unwrap_err();
    assert!(matches!(err, PipelineError::SchemaMismatch { expected: 6, found: 7 }));
}

/// Two months of observations with mixed Arrow types and a missing spot count.
fn write_parquet_fixture() -> tempfile::NamedTempFile {
    let types = [
        DataType::Int32,
        DataType::Int64,
        DataType::Float64,
        DataType::Float64,
        DataType::Float64,
        DataType::Int64,
        DataType::Int32,
    ];
    let schema = Arc::new(Schema::new(
        OBSERVATION_COLUMNS
            .iter()
            .zip(types)
            .map(|(name, ty)| Field::new(*name, ty, true))
            .collect::<Vec<_>>(),
    ));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int32Array::from(vec![1749, 1749])),
        Arc::new(Int64Array::from(vec![1, 2])),
        Arc::new(Float64Array::from(vec![1749.042, 1749.123])),
        Arc::new(Float64Array::from(vec![Some(96.7), None])),
        Arc::new(Float64Array::from(vec![-1.0, -1.0])),
        Arc::new(Int64Array::from(vec![-1, -1])),
        Arc::new(Int32Array::from(vec![1, 1])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

    let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
    let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
    file
}

#[test]
fn parquet_columns_load_by_position() {
    let file = write_parquet_fixture();
    let table =
        load_with_options(file.path(), &OBSERVATION_COLUMNS, &LoadOptions::default()).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.column_names(), OBSERVATION_COLUMNS.to_vec());
    assert_eq!(table.column(YEAR).unwrap().values[0], CellValue::Integer(1749));
    assert_eq!(table.column("month").unwrap().values[1], CellValue::Integer(2));
    assert_eq!(table.column(DATE_FRAC).unwrap().values[1], CellValue::Float(1749.123));
    assert_eq!(
        table.column(TOTAL_SPOT_NUM).unwrap().values,
        vec![CellValue::Float(96.7), CellValue::Null]
    );
    assert_eq!(table.column("marker").unwrap().values[0], CellValue::Integer(1));

    let err = load_with_options(file.path(), &["a", "b", "c"], &LoadOptions::default())
        .unwrap_err();
    assert!(matches!(err, PipelineError::SchemaMismatch { expected: 3, found: 7 }));
}

#[test]
fn parquet_without_valid_contents_is_unavailable() {
    let mut file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
    file.write_all(b"not parquet").unwrap();
    let err = load_with_options(file.path(), &OBSERVATION_COLUMNS, &LoadOptions::default())
        .unwrap_err();
    assert!(matches!(err, PipelineError::DataUnavailable { .. }));
}

// ---------------------------------------------------------------------------
// Compositions
// ---------------------------------------------------------------------------

#[test]
fn each_request_reads_the_file_afresh() {
    let file = write_fixture("1900,1,1900.042,10,0,1,1\n");
    let source = DataSource::new(file.path());
    assert_eq!(smoothed_series(&source, (1749, 2022), 1).unwrap().len(), 1);

    std::fs::write(
        file.path(),
        "1900,1,1900.042,10,0,1,1\n1900,2,1900.125,20,0,1,1\n",
    )
    .unwrap();
    assert_eq!(smoothed_series(&source, (1749, 2022), 1).unwrap().len(), 2);
    assert_eq!(cycle_series(&source, (1749, 2022), 11.0).unwrap().len(), 2);
}

#[test]
fn invalid_parameters_surface_their_kind() {
    let file = write_fixture(&monthly_rows());
    let source = DataSource::new(file.path());

    let err = smoothed_series(&source, (1800, 1900), 0).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidWindow(0)));

    let err = cycle_series(&source, (1800, 1900), -2.0).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidCycleLength(_)));

    let missing = DataSource::new("no/such/SN_m_tot_V2.0.csv");
    let err = cycle_series(&missing, (1800, 1900), 11.0).unwrap_err();
    assert!(matches!(err, PipelineError::DataUnavailable { .. }));
}

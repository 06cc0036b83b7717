use std::{fs, path::PathBuf};

use forecast_lookup::{
    aggregate::{aggregate, AggregatedReport, ParameterForecast},
    config::ParameterSource,
    load::load_context,
    matcher::{match_location, LocationKey, MatchResult},
    report::{assemble, render_all, ParameterStatus},
    table::{load_table, ParameterKind},
};
use tempfile::TempDir;

const RAINFALL: &str = "\
Sno,SP_CODE,VILLAGE,MANDAL,DISTRICT,LON,LAT,10-04-25,09-04-25,32-04-25
1,101,Gudur,X,Y,79.8,14.1,1.2,0.0,9.9
2,102,Kota,Z,Nellore,80.0,14.0,0.0,0.0,0.0
";

const HUMIDITY: &str = "\
VILLAGE,MANDAL,DISTRICT,09-04-25,10-04-25
Gudur,X,Y,80,82
Gudurpet,X,Y,70,75
";

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn sources(dir: &TempDir) -> Vec<ParameterSource> {
    vec![
        ParameterSource::for_kind(ParameterKind::Rainfall, write(dir, "rf.csv", RAINFALL)),
        ParameterSource::for_kind(ParameterKind::Humidity, write(dir, "rh.csv", HUMIDITY)),
        ParameterSource::for_kind(ParameterKind::WindSpeed, dir.path().join("ws.csv")),
    ]
}

#[test]
fn should_look_up_single_location_end_to_end() {
    let dir = TempDir::new().unwrap();
    let table = load_table("Rainfall", &write(&dir, "rf.csv", RAINFALL)).unwrap();

    assert_eq!(table.date_columns.headers(), vec!["09-04-25", "10-04-25"]);
    assert_eq!(table.date_columns.skipped(), &["32-04-25".to_string()]);

    let MatchResult::Found(matches) = match_location(&table, "gudur") else {
        panic!("expected a match");
    };
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].key, LocationKey::new("Gudur", "X", "Y"));
    let series: Vec<(&str, Option<f64>)> = matches[0]
        .series
        .iter()
        .map(|p| (p.date.as_str(), p.value))
        .collect();
    assert_eq!(series, vec![("09-04-25", Some(0.0)), ("10-04-25", Some(1.2))]);
}

#[tokio::test]
async fn should_report_partial_availability() {
    let dir = TempDir::new().unwrap();
    let context = load_context(&sources(&dir), false).await;

    let AggregatedReport::Found(locations) = aggregate(&context, "gudur") else {
        panic!("expected locations");
    };
    assert_eq!(locations.len(), 2);
    assert!(matches!(
        locations[1].parameters[0].1,
        ParameterForecast::NoMatch
    ));

    let reports: Vec<_> = locations
        .iter()
        .map(|l| assemble(&context, "gudur", l))
        .collect();
    let statuses: Vec<ParameterStatus> = reports[0].parameters.iter().map(|p| p.status).collect();
    assert_eq!(
        statuses,
        vec![
            ParameterStatus::Available,
            ParameterStatus::Available,
            ParameterStatus::NotInitialized
        ]
    );
    assert_eq!(reports[0].parameters[1].min, Some(80.0));
    assert_eq!(reports[0].parameters[1].max, Some(82.0));
    assert_eq!(reports[0].period.start, "09-04-25");

    let text = render_all(&reports);
    assert_eq!(
        text,
        "Local Weather Forecast\n\
         Location: Gudur, X, Y\n\
         Outlook (09-04-25 - 10-04-25):\n  \
         Rainfall: Rainfall is forecast: 1.2 on 10-04-25. Dry on 09-04-25.\n  \
         Humidity: between 80% and 82%, peaking on 10-04-25.\n  \
         Wind Speed: unavailable (not initialized)\n\
         ---\n\
         Local Weather Forecast\n\
         Location: Gudurpet, X, Y\n\
         Outlook (09-04-25 - 10-04-25):\n  \
         Rainfall: unavailable (no match)\n  \
         Humidity: between 70% and 75%, peaking on 10-04-25.\n  \
         Wind Speed: unavailable (not initialized)"
    );
}

#[tokio::test]
async fn should_produce_identical_output_across_runs() {
    let dir = TempDir::new().unwrap();
    let context = load_context(&sources(&dir), false).await;

    let render = |query: &str| match aggregate(&context, query) {
        AggregatedReport::Found(locations) => {
            let reports: Vec<_> = locations
                .iter()
                .map(|l| assemble(&context, query, l))
                .collect();
            serde_json::to_string(&reports).unwrap()
        }
        other => format!("{:?}", other),
    };

    assert_eq!(render("y"), render("y"));
    assert_eq!(render("nowhere"), "LocationNotFound");
}

#[tokio::test]
async fn should_signal_no_data_when_every_source_fails() {
    let dir = TempDir::new().unwrap();
    let no_identity = write(&dir, "rh.csv", "Location,09-04-25\nGudur,1\n");
    let sources = vec![
        ParameterSource::for_kind(ParameterKind::Rainfall, dir.path().join("rf.csv")),
        ParameterSource::for_kind(ParameterKind::Humidity, no_identity),
    ];

    let context = load_context(&sources, false).await;

    assert!(context.is_empty());
    assert_eq!(context.failures().len(), 2);
    assert_eq!(aggregate(&context, "Gudur"), AggregatedReport::NoDataAvailable);
}

#[tokio::test]
async fn should_report_nan_and_infinite_cells_as_missing() {
    let dir = TempDir::new().unwrap();
    let sources = vec![
        ParameterSource::for_kind(
            ParameterKind::Rainfall,
            write(&dir, "rf.csv", "VILLAGE,09-04-25,10-04-25\nGudur,NaN,NaN\n"),
        ),
        ParameterSource::for_kind(
            ParameterKind::Temperature,
            write(&dir, "t2.csv", "VILLAGE,09-04-25,10-04-25\nGudur,30,inf\n"),
        ),
    ];
    let context = load_context(&sources, false).await;

    let AggregatedReport::Found(locations) = aggregate(&context, "gudur") else {
        panic!("expected locations");
    };
    let report = assemble(&context, "gudur", &locations[0]);

    assert_eq!(report.parameters[0].values[0].value, None);
    assert_eq!(report.parameters[1].max, Some(30.0));
    assert_eq!(
        render_all(&[report]),
        "Local Weather Forecast\n\
         Location: Gudur\n\
         Outlook (09-04-25 - 10-04-25):\n  \
         Rainfall: no values reported\n  \
         Temperature: steady at 30."
    );
}

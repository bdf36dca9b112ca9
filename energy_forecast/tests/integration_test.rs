use approx::assert_relative_eq;
use energy_forecast::dashboard::{build_view, DashboardState, ViewConfig};
use energy_forecast::evaluation::backtest_metric;
use energy_forecast::metric::{CONSUMPTION, OTHER_SOURCES, SOLAR, SOLAR_PERCENTAGE};
use energy_forecast::sheet::{filter_year, SheetLayout};
use energy_forecast::{FixedJitter, ProjectionConfig, Projector};

/// Build one sheet row with the energy layout's 20 columns
fn sheet_row(date: &str, consumption: f64, solar: f64, solar_pct: f64) -> Vec<String> {
    let mut row = vec![String::new(); 20];
    row[1] = date.to_string();
    row[5] = solar.to_string();
    row[7] = consumption.to_string();
    row[8] = format!("{}%", solar_pct);
    row
}

fn sheet_payload() -> String {
    let mut rows: Vec<Vec<String>> = vec![
        vec!["WattWise energy sheet".to_string()],
        vec![],
        vec!["HTC 179".to_string(), "Month".to_string()],
        vec![],
    ];
    rows.push(sheet_row("2023-09-01", 1000.0, 100.0, 10.0));
    rows.push(sheet_row("2023-10-01", 1100.0, 120.0, 11.0));
    rows.push(sheet_row("", 0.0, 0.0, 0.0));
    rows.push(sheet_row("2023-11-01", 1200.0, 140.0, 12.0));
    rows.push(sheet_row("2023-12-01", 1300.0, 160.0, 13.0));
    serde_json::to_string(&rows).unwrap()
}

#[test]
fn test_full_projection_workflow() {
    // 1. Map the sheet payload
    let layout = SheetLayout::energy_sheet();
    let history = layout.map_json(&sheet_payload()).unwrap();
    assert_eq!(history.len(), 4);
    assert_eq!(history[0].value(OTHER_SOURCES), Some(900.0));
    assert_eq!(history[3].value(SOLAR_PERCENTAGE), Some(13.0));
    assert_eq!(history[3].value("price"), None);

    // 2. Project every metric the layout produces
    let projector = Projector::new(ProjectionConfig::default().with_horizon(3)).unwrap();
    let predicted = projector
        .project_with_jitter(&history, &layout.metric_names(), &mut FixedJitter::zero())
        .unwrap();

    assert_eq!(predicted.len(), 3);
    assert_eq!(predicted[0].period().to_string(), "2024-01");
    assert_relative_eq!(predicted[0].value(CONSUMPTION).unwrap(), 1400.0);
    assert_relative_eq!(predicted[0].value(SOLAR).unwrap(), 180.0);
    // Percentages drift at half speed
    assert_relative_eq!(predicted[0].value(SOLAR_PERCENTAGE).unwrap(), 13.5);
    assert!(predicted[0].value("price").is_none());

    // 3. Assemble the dashboard for 2023 with the overlay
    let state = DashboardState {
        year: Some(2023),
        show_predictions: true,
    };
    let charts = build_view(
        &filter_year(&history, 2023),
        &ViewConfig::energy_overview(),
        &state,
        &ProjectionConfig::default(),
        &mut FixedJitter::zero(),
    )
    .unwrap();
    let consumption = charts
        .iter()
        .find(|c| c.descriptor.metric == CONSUMPTION)
        .unwrap();
    assert_eq!(consumption.observed().count(), 4);
    assert_eq!(consumption.projected().count(), 6);

    // 4. Backtest the drift on the last two months
    let accuracy = backtest_metric(
        &history,
        CONSUMPTION,
        2,
        &ProjectionConfig::default(),
        &mut FixedJitter::zero(),
    )
    .unwrap();
    assert_relative_eq!(accuracy.mae, 0.0);
}

#[test]
fn test_numeric_json_cells_are_accepted() {
    let payload = r#"[["2023-01", 10, null], ["2023-02", 12.5, "3"]]"#;
    let layout = SheetLayout::new(0, 0).column("a", 1).column("b", 2);

    let history = layout.map_json(payload).unwrap();
    assert_eq!(history[0].value("a"), Some(10.0));
    assert_eq!(history[0].value("b"), None);
    assert_eq!(history[1].value("a"), Some(12.5));
    assert_eq!(history[1].value("b"), Some(3.0));
}

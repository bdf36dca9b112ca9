// Walks through mapping sheet rows, projecting them and assembling the
// dashboard series with the projected overlay.
use energy_forecast::dashboard::{build_view, DashboardState, ViewConfig};
use energy_forecast::evaluation::backtest_metric;
use energy_forecast::logger::initialize_logger;
use energy_forecast::metric::CONSUMPTION;
use energy_forecast::sheet::SheetLayout;
use energy_forecast::{ProjectionConfig, ProjectionError, ProjectionStrategy, UniformJitter};
use log::info;

fn sample_rows() -> Vec<Vec<String>> {
    let mut rows = vec![vec![String::new(); 20]; 4];
    let months = [
        ("2023-01-01", 41200.0, 6100.0),
        ("2023-02-01", 39800.0, 6900.0),
        ("2023-03-01", 44100.0, 7800.0),
        ("2023-04-01", 47300.0, 8200.0),
        ("2023-05-01", 49900.0, 8000.0),
        ("2023-06-01", 45200.0, 6400.0),
    ];
    for (date, consumption, solar) in months {
        let mut row = vec![String::new(); 20];
        row[1] = date.to_string();
        row[5] = format!("{:.0}", solar);
        row[7] = format!("{:.0}", consumption);
        row[8] = format!("{:.1}%", solar / consumption * 100.0);
        row[15] = format!("{:.0}", solar * 7.2);
        rows.push(row);
    }
    rows
}

fn main() -> Result<(), ProjectionError> {
    initialize_logger();

    let layout = SheetLayout::energy_sheet();
    let history = layout.map_rows(&sample_rows())?;
    info!("Loaded {} months of history", history.len());

    let state = DashboardState {
        year: Some(2023),
        show_predictions: true,
    };

    for strategy in [
        ProjectionStrategy::LinearDrift,
        ProjectionStrategy::PatternRepeat,
    ] {
        let config = ProjectionConfig::default().with_strategy(strategy);
        let mut jitter = UniformJitter::seeded(17);
        let charts = build_view(
            &history,
            &ViewConfig::energy_overview(),
            &state,
            &config,
            &mut jitter,
        )?;

        println!("=== {:?} ===", strategy);
        for chart in charts.iter().filter(|c| !c.points.is_empty()) {
            let points: Vec<String> = chart
                .points
                .iter()
                .map(|p| {
                    let marker = if p.projected { "*" } else { "" };
                    format!("{}{}={:.1}", p.period, marker, p.value)
                })
                .collect();
            println!("{:<20} {}", chart.descriptor.title, points.join(" "));
        }

        let accuracy = backtest_metric(
            &history,
            CONSUMPTION,
            2,
            &config,
            &mut UniformJitter::seeded(17),
        )?;
        println!("{}", accuracy);
    }

    println!("Points marked * are projections, not forecasts.");
    Ok(())
}

// One function per dashboard page: build the view, export it under the
// output directory, and print a short console preview.
use std::fs;

use crate::catalog::{YEAR_MAX, YEAR_MIN};
use crate::config::Config;
use crate::context::DataContext;
use crate::error::{AppError, OutputError};
use crate::output;
use crate::util::{format_int, format_number};
use crate::views::{self, groups::GroupDrilldown};

/// The pages in sidebar order.
pub const PAGES: [&str; 5] = [
    "Terrorist activities",
    "Attacks by region",
    "Terrorist groups",
    "Target of terrorist groups",
    "Military Spending vs. Casualties",
];

fn prepare_out_dir(config: &Config) -> Result<(), OutputError> {
    fs::create_dir_all(&config.out_dir)?;
    Ok(())
}

fn exported(config: &Config, file: &str) {
    log::info!("wrote {}", config.output_path(file).display());
}

pub fn activities_page(ctx: &DataContext, config: &Config, year: i32) -> Result<(), AppError> {
    let view = views::activities_view(ctx.incidents(), year)?;
    prepare_out_dir(config)?;

    let points_file = format!("activities_{}_points.csv", year);
    output::write_csv(&config.output_path(&points_file), &view.points)?;
    output::write_csv(&config.output_path("activities_trend.csv"), &view.trend)?;
    output::write_json(&config.output_path(&format!("activities_{}.json", year)), &view)?;
    exported(config, &points_file);

    println!("1. Terrorist activities from {} to {}\n", YEAR_MIN, YEAR_MAX);
    println!("- Total number of attacks: {}", format_int(view.total_attacks));
    println!(
        "- Total number of casualties: {}",
        format_number(view.total_casualties, 0)
    );
    println!(
        "- Attacks with map coordinates: {}",
        format_int(view.mapped_attacks)
    );
    if let Some(b) = view.bounds {
        let (lat, lon) = b.center();
        println!("- Map centre: {:.2}, {:.2}", lat, lon);
    }
    println!("\nMap of terrorist activities in {} (sample)\n", year);
    output::preview_table_rows(&view.points, config.preview_rows);
    println!("Attacks vs. Casualties from {} to {}\n", YEAR_MIN, YEAR_MAX);
    output::preview_table_rows(&view.trend, config.preview_rows);
    Ok(())
}

pub fn regions_page(
    ctx: &DataContext,
    config: &Config,
    selected: &[String],
) -> Result<(), AppError> {
    let view = views::regions_view(ctx.incidents(), selected)?;
    prepare_out_dir(config)?;
    output::write_crosstab(
        &config.output_path("regions_attacks.csv"),
        "Year",
        &view.attacks,
    )?;
    output::write_json(&config.output_path("regions.json"), &view)?;
    exported(config, "regions_attacks.csv");

    if selected.is_empty() {
        println!("2. Attacks by region from {} to {}\n", YEAR_MIN, YEAR_MAX);
    } else {
        println!(
            "2. Attacks in {} from {} to {}\n",
            view.selected.join(", "),
            YEAR_MIN,
            YEAR_MAX
        );
    }
    output::preview_crosstab("Year", &view.attacks, config.preview_rows);
    Ok(())
}

pub fn groups_page(
    ctx: &DataContext,
    config: &Config,
    selected: &[String],
) -> Result<(), AppError> {
    let view = views::groups_view(ctx.incidents(), selected)?;
    prepare_out_dir(config)?;
    output::write_csv(&config.output_path("groups_top10.csv"), &view.top_groups)?;
    output::write_crosstab(
        &config.output_path("groups_timeline.csv"),
        "Year",
        &view.timeline,
    )?;
    output::write_crosstab(&config.output_path("groups_scope.csv"), "Region", &view.scope)?;
    for trend in &view.region_trends {
        let file = format!("groups_trend_{}.csv", file_stem(&trend.region));
        output::write_series(&config.output_path(&file), &trend.countries)?;
    }
    output::write_json(&config.output_path("groups.json"), &view)?;
    exported(config, "groups.json");

    println!("3. Notorious terrorist groups from {} to {}\n", YEAR_MIN, YEAR_MAX);
    output::preview_table_rows(&view.top_groups, view.top_groups.len());
    println!("Activities of top notorious groups\n");
    output::preview_crosstab("Year", &view.timeline, config.preview_rows);
    println!("Which regions do the terrorist groups operate in?\n");
    output::preview_crosstab("Region", &view.scope, view.scope.rows().len());
    for trend in &view.region_trends {
        println!("Casualties by country in {}\n", trend.region);
        output::preview_series(&trend.countries, config.preview_rows);
    }
    for d in &view.drilldowns {
        print_drilldown(d);
    }
    Ok(())
}

/// Lowercase ASCII words joined by `_`, e.g. `middle_east_north_africa`.
fn file_stem(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

fn print_drilldown(d: &GroupDrilldown) {
    println!("{}\n", d.title);
    println!("Casualties by country");
    output::preview_table_rows(&d.casualties_by_country, d.casualties_by_country.len());
    println!("Attack types");
    output::preview_table_rows(&d.attack_types, d.attack_types.len());
    println!("Targets");
    output::preview_table_rows(&d.target_types, d.target_types.len());
}

pub fn targets_page(ctx: &DataContext, config: &Config, group: &str) -> Result<(), AppError> {
    let view = views::targets_view(ctx.incidents(), group)?;
    prepare_out_dir(config)?;
    output::write_crosstab(&config.output_path("targets.csv"), "Year", &view.targets)?;
    output::write_json(&config.output_path("targets.json"), &view)?;
    exported(config, "targets.csv");

    println!("4. Targets of {}\n", view.group);
    output::preview_crosstab("Year", &view.targets, config.preview_rows);
    Ok(())
}

pub fn spending_page(ctx: &DataContext, config: &Config) -> Result<(), AppError> {
    let view = views::spending_view(ctx.spending(), ctx.incidents())?;
    prepare_out_dir(config)?;

    let mut traces = vec![view.casualties.clone()];
    traces.extend(view.countries.iter().cloned());
    output::write_series(&config.output_path("spending_vs_casualties.csv"), &traces)?;
    output::write_json(&config.output_path("spending.json"), &view)?;
    exported(config, "spending_vs_casualties.csv");

    println!("5. Military Spending vs. Casualties\n");
    output::preview_series(&traces, config.preview_rows);
    Ok(())
}

pub fn summary_page(ctx: &DataContext, config: &Config) -> Result<(), AppError> {
    let summary = views::dataset_summary(ctx.incidents(), ctx.spending());
    prepare_out_dir(config)?;
    output::write_json(&config.output_path("summary.json"), &summary)?;
    exported(config, "summary.json");

    println!("Summary Stats (summary.json):");
    println!(
        "{{\"incidents\": {}, \"casualties\": {}, \"groups\": {}, \"spending_countries\": {}}}\n",
        format_int(summary.total_incidents),
        format_number(summary.total_casualties, 0),
        format_int(summary.total_groups),
        format_int(summary.spending_countries)
    );
    Ok(())
}

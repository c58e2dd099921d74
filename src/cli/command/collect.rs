use std::time::Duration;

use anyhow::Result;

use crate::{
    cli::CollectArgs,
    collect::{Collector, Location, RunSummary},
    credential::read_api_key,
    params::ParameterSet,
    range::TimeRange,
    source::SourceClient,
};

use super::make_csv_file_name;

pub async fn collect(args: &CollectArgs) -> Result<String> {
    // Fatal precondition: no request is attempted without a credential.
    let api_key = read_api_key(&args.key_file)?;

    let range = match (args.start, args.end) {
        (Some(start), Some(end)) => TimeRange::new(start, end)?,
        _ => TimeRange::last_years(args.years),
    };

    println!("Fetching data from {} to {}", range.start, range.end);

    let source = SourceClient::new(api_key, Duration::from_secs(args.timeout))?;
    let collector = Collector::new(
        source,
        ParameterSet::default(),
        Location {
            lat: args.lat,
            lng: args.lng,
        },
        args.hour,
    );

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| make_csv_file_name(args.hour));

    let summary = collector.run(&range, args.max_requests, &output).await?;
    print_summary(&summary);

    Ok(output.to_string_lossy().to_string())
}

fn print_summary(summary: &RunSummary) {
    println!(
        "\nCollected {} of {} days in {} requests",
        summary.days_fetched, summary.total_days, summary.chunks
    );

    if summary.missing.is_empty() {
        println!("All dates are covered in the fetched data");
    } else {
        println!("Missing dates: {}", summary.missing.len());
        for day in summary.missing.iter().take(10) {
            println!("  {}", day);
        }
        if summary.missing.len() > 10 {
            println!("  ... and {} more", summary.missing.len() - 10);
        }
    }
}

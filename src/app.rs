//! One collection run: fetch, parse, append.
//!
//! Failures are reported on stderr and end the run early; a fetch or parse
//! failure leaves the log file untouched. The process exit code stays 0
//! either way; operator visibility comes from the printed diagnostics.

use crate::cli::Cli;
use crate::error::AppError;
use crate::fetch::fetch_xml;
use crate::record::append_row;
use crate::report::parse_report;
use crate::utils::Timezone;

pub(crate) fn run(cli: &Cli) {
    let timezone = match Timezone::parse(cli.timezone.as_deref()) {
        Ok(tz) => tz,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };

    let url = cli.endpoint();
    let output = cli.output_path();

    let xml = match fetch_xml(url) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("{}", AppError::from(err));
            eprintln!("Failed to fetch XML data. Exiting.");
            return;
        }
    };

    let report = match parse_report(&xml) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("{}", AppError::from(err));
            eprintln!("Parsing failed. Exiting.");
            return;
        }
    };

    if cli.debug {
        eprintln!(
            "Parsed category {:?} with {} project(s)",
            report.category,
            report.counts.len()
        );
        let mut projects: Vec<_> = report.counts.iter().collect();
        projects.sort();
        for (project, count) in projects {
            eprintln!("  {project}: {count}");
        }
    }

    let today = timezone.today();
    if let Err(err) = append_row(&output, &report, today) {
        eprintln!("{}", AppError::from(err));
        return;
    }

    if !cli.quiet {
        println!("Updated {} with today's data.", output.display());
    }
}

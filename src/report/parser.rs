//! GLAMorous XML parser
//!
//! Extracts the tracked category and the per-project usage counts from the
//! endpoint response. Attribute-level problems are tolerated via defaulting;
//! only undecodable bytes or malformed XML abort the run.

use std::collections::HashMap;

use roxmltree::Document;

use crate::consts::UNKNOWN_CATEGORY;
use crate::error::ParseError;

use super::types::UsageReport;

pub(crate) fn parse_report(xml: &[u8]) -> Result<UsageReport, ParseError> {
    let text = std::str::from_utf8(xml)?;
    let doc = Document::parse(text)?;
    let root = doc.root_element();

    let category = root
        .attribute("category")
        .unwrap_or(UNKNOWN_CATEGORY)
        .to_string();

    let mut counts = HashMap::new();

    // A response without <stats> is a valid "no data" outcome, not an error.
    let Some(stats) = root.children().find(|n| n.has_tag_name("stats")) else {
        return Ok(UsageReport { category, counts });
    };

    for usage in stats.children().filter(|n| n.has_tag_name("usage")) {
        let project = usage.attribute("project").unwrap_or("").to_string();
        // Missing or unparsable counts are recorded as zero, never an error.
        let count = usage
            .attribute("usage_count")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .unwrap_or(0);
        counts.insert(project, count);
    }

    Ok(UsageReport { category, counts })
}

/// Standard date format for row stamps: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fallback category when the endpoint omits the `category` attribute
pub(crate) const UNKNOWN_CATEGORY: &str = "Unknown";

/// GLAMorous query for the tracked category
pub(crate) const XML_URL: &str = "https://glamtools.toolforge.org/glamorous.php?doit=1&category=Files+from+the+Biodiversity+Heritage+Library&use_globalusage=1&show_details=1&projects[wikipedia]=1&projects[wikibooks]=1&projects[wikispecies]=1&projects[wikidata]=1&projects[wikiversity]=1&format=xml";

/// Default log file, relative to the working directory
pub(crate) const OUTPUT_FILE: &str = "usage.tsv";

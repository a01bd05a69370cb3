//! Resource name helpers.
//!
//! Each `*_path` function formats a resource name and the matching `parse_*`
//! function splits one back into its named segments. Parsing a name of the
//! wrong shape yields an empty map.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static BILLING_ACCOUNT_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^billingAccounts/(?P<billing_account>.+?)$").ok());
static FOLDER_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^folders/(?P<folder>.+?)$").ok());
static ORGANIZATION_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^organizations/(?P<organization>.+?)$").ok());
static PROJECT_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^projects/(?P<project>.+?)$").ok());
static LOCATION_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^projects/(?P<project>.+?)/locations/(?P<location>.+?)$").ok()
});

fn segments(re: &LazyLock<Option<Regex>>, path: &str) -> HashMap<String, String> {
    let Some(re) = re.as_ref() else {
        return HashMap::new();
    };
    let Some(caps) = re.captures(path) else {
        return HashMap::new();
    };
    re.capture_names()
        .flatten()
        .filter_map(|name| caps.name(name).map(|m| (name.to_owned(), m.as_str().to_owned())))
        .collect()
}

#[must_use]
pub fn common_billing_account_path(billing_account: &str) -> String {
    format!("billingAccounts/{billing_account}")
}

#[must_use]
pub fn parse_common_billing_account_path(path: &str) -> HashMap<String, String> {
    segments(&BILLING_ACCOUNT_RE, path)
}

#[must_use]
pub fn common_folder_path(folder: &str) -> String {
    format!("folders/{folder}")
}

#[must_use]
pub fn parse_common_folder_path(path: &str) -> HashMap<String, String> {
    segments(&FOLDER_RE, path)
}

#[must_use]
pub fn common_organization_path(organization: &str) -> String {
    format!("organizations/{organization}")
}

#[must_use]
pub fn parse_common_organization_path(path: &str) -> HashMap<String, String> {
    segments(&ORGANIZATION_RE, path)
}

#[must_use]
pub fn common_project_path(project: &str) -> String {
    format!("projects/{project}")
}

#[must_use]
pub fn parse_common_project_path(path: &str) -> HashMap<String, String> {
    segments(&PROJECT_RE, path)
}

#[must_use]
pub fn common_location_path(project: &str, location: &str) -> String {
    format!("projects/{project}/locations/{location}")
}

/// Keys: `project`, `location`.
#[must_use]
pub fn parse_common_location_path(path: &str) -> HashMap<String, String> {
    segments(&LOCATION_RE, path)
}

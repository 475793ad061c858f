// Hard-coded business tables for the dashboard pages.
//
// None of these are derived from the data. They describe the reference
// deployment over the 1970-2017 incident file and must be edited by hand if
// that file changes.

/// Inclusive year domain of the activities slider.
pub const YEAR_MIN: i32 = 1970;
pub const YEAR_MAX: i32 = 2017;
pub const DEFAULT_YEAR: i32 = 2014;

/// Length of the ranked group list (after dropping the most frequent label).
pub const TOP_GROUP_COUNT: usize = 10;

/// Depth of every "top N" list in the group drill-down panels.
pub const DRILLDOWN_DEPTH: usize = 5;

/// Sentinel entity name of the aggregate row in the spending file.
pub const WORLD_ENTITY: &str = "World";

/// `Type` value of per-country rows in the spending file.
pub const COUNTRY_TYPE: &str = "Country";

/// Many-to-one relabeling of raw target types into coarse buckets.
/// Labels not listed here (e.g. "Private Citizens & Property", "Unknown")
/// pass through unchanged.
pub const TARGET_TYPE_BUCKETS: [(&str, &str); 20] = [
    ("Government (Diplomatic)", "Government"),
    ("Government (General)", "Government"),
    ("Police", "Police & Military"),
    ("Military", "Police & Military"),
    ("Airports & Aircraft", "Business and Utilities"),
    ("Business", "Business and Utilities"),
    ("Utilities", "Business and Utilities"),
    ("Food or Water Supply", "Business and Utilities"),
    ("Tourists", "Private Citizens & Property"),
    ("Journalists & Media", "Telecoms and Journalism"),
    ("Telecommunication", "Telecoms and Journalism"),
    ("Transportation", "Business and Utilities"),
    ("Violent Political Party", "Other Violent Group"),
    ("Terrorists/Non-State Militia", "Other Violent Group"),
    ("Other", "Private Citizens & Property"),
    ("Abortion Related", "Private Citizens & Property"),
    ("Maritime", "Business and Utilities"),
    ("Religious Figures/Institutions", "Religious, Educational, Political"),
    ("Educational Institution", "Religious, Educational, Political"),
    ("NGO", "Religious, Educational, Political"),
];

pub fn canonical_target_type(raw: &str) -> &str {
    TARGET_TYPE_BUCKETS
        .iter()
        .find(|(source, _)| *source == raw)
        .map(|(_, bucket)| *bucket)
        .unwrap_or(raw)
}

/// Short column labels for the scope-of-operation matrix, keyed by group name.
/// The set must equal the computed top-10 list.
pub const SCOPE_LABELS: [(&str, &str); TOP_GROUP_COUNT] = [
    ("Taliban", "Taliban"),
    ("Islamic State of Iraq and the Levant (ISIL)", "ISIL"),
    ("Shining Path (SL)", "SL"),
    ("Farabundo Marti National Liberation Front (FMLN)", "FMLN"),
    ("Al-Shabaab", "Al-Shabaab"),
    ("New People's Army (NPA)", "NPA"),
    ("Irish Republican Army (IRA)", "IRA"),
    ("Revolutionary Armed Forces of Colombia (FARC)", "FARC"),
    ("Boko Haram", "Boko Haram"),
    ("Kurdistan Workers' Party (PKK)", "PKK"),
];

pub fn scope_label(group: &str) -> Option<&'static str> {
    SCOPE_LABELS
        .iter()
        .find(|(name, _)| *name == group)
        .map(|(_, label)| *label)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrilldownCase {
    pub group: &'static str,
    pub region: &'static str,
    pub title: &'static str,
}

/// The two fixed group breakdowns: the dominant group of each focus region.
pub const DRILLDOWN_CASES: [DrilldownCase; 2] = [
    DrilldownCase {
        group: "Islamic State of Iraq and the Levant (ISIL)",
        region: "Middle East & North Africa",
        title: "ISIL in Middle East & North Africa",
    },
    DrilldownCase {
        group: "Taliban",
        region: "South Asia",
        title: "Taliban in South Asia",
    },
];

/// Regions whose leading countries get a casualty trend on the groups page,
/// one chart per drill-down region.
pub const FOCUS_REGIONS: [&str; 2] = ["Middle East & North Africa", "South Asia"];
pub const FOCUS_COUNTRY_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpendingScale {
    pub country: &'static str,
    pub divisor: f64,
    pub label: &'static str,
}

/// Display-only unit conversions so spending sits on the casualty axis.
pub const SPENDING_SCALES: [SpendingScale; 3] = [
    SpendingScale {
        country: "Nigeria",
        divisor: 1e5,
        label: "Nigeria Spending in $100,000",
    },
    SpendingScale {
        country: "Iraq",
        divisor: 1e5,
        label: "Iraq Spending in $100,000",
    },
    SpendingScale {
        country: "United States",
        divisor: 1e7,
        label: "US Spending in $10,000,000",
    },
];

use serde::Serialize;

use crate::catalog::canonical_target_type;
use crate::crosstab::Crosstab;
use crate::error::ViewError;
use crate::types::Incident;
use crate::views::groups::top_groups;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetsView {
    pub group: String,
    /// The top-10 group names the selector offers.
    pub options: Vec<String>,
    /// Year x canonical target type for `group`, columns alphabetical.
    pub targets: Crosstab<i32>,
}

pub fn targets_view(incidents: &[Incident], group: &str) -> Result<TargetsView, ViewError> {
    let options: Vec<String> = top_groups(incidents)?
        .into_iter()
        .map(|g| g.group)
        .collect();
    if !options.iter().any(|g| g == group) {
        return Err(ViewError::UnknownKey {
            kind: "top-10 group",
            name: group.to_string(),
        });
    }

    let targets = Crosstab::count(
        incidents
            .iter()
            .filter(|i| i.group == group)
            .map(|i| (i.year, canonical_target_type(&i.target_type))),
    )
    .sorted_columns();

    Ok(TargetsView {
        group: group.to_string(),
        options,
        targets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_groups() -> Vec<Incident> {
        let mut data: Vec<Incident> = Vec::new();
        let mut push = |year: i32, group: &str, target: &str, n: usize| {
            for _ in 0..n {
                data.push(Incident {
                    year,
                    group: group.to_string(),
                    target_type: target.to_string(),
                    ..Default::default()
                });
            }
        };
        push(2000, "Unknown", "Business", 30);
        push(2010, "Taliban", "Police", 2);
        push(2010, "Taliban", "Military", 1);
        push(2011, "Taliban", "Government (General)", 1);
        push(2011, "Taliban", "Private Citizens & Property", 1);
        for g in ["a", "b", "c", "d", "e", "f", "g", "h", "i"] {
            push(2000, g, "Business", 1);
        }
        data
    }

    #[test]
    fn counts_canonical_targets_per_year() {
        let view = targets_view(&with_groups(), "Taliban").unwrap();
        assert_eq!(
            view.targets.columns(),
            &["Government", "Police & Military", "Private Citizens & Property"]
        );
        assert_eq!(view.targets.rows(), &[2010, 2011]);
        assert_eq!(view.targets.get(&2010, "Police & Military"), Some(3));
        assert_eq!(view.targets.get(&2011, "Government"), Some(1));
        assert_eq!(view.options[0], "Taliban");
    }

    #[test]
    fn group_outside_top_ten_is_rejected() {
        let err = targets_view(&with_groups(), "Unknown").unwrap_err();
        assert!(matches!(err, ViewError::UnknownKey { .. }));
    }
}

//! Calibration constraints derived from the language table.
//!
//! A calibration spec that starts with an ASCII digit and contains no `-` is
//! read as a year and converted to an age before the reference year. Anything
//! else non-empty (ranges, distribution expressions) passes through verbatim.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use tuled_core::{CalibrationConstraint, CalibrationTarget, CoreError, LanguageRecord};

/// Header line of the calibration file.
pub const CALIBRATION_HEADER: &str = "[calibration]";

#[derive(Debug, thiserror::Error)]
pub enum CalibrationError {
    #[error("Calibration for {target} looks like a year but is not a number: '{spec}'")]
    InvalidYear { target: String, spec: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationBuilder {
    pub reference_year: f64,
    pub min_age: f64,
}

impl Default for CalibrationBuilder {
    fn default() -> Self {
        Self {
            reference_year: 2020.0,
            min_age: 0.1,
        }
    }
}

impl CalibrationBuilder {
    #[must_use]
    pub const fn new(reference_year: f64, min_age: f64) -> Self {
        Self {
            reference_year,
            min_age,
        }
    }

    /// Build constraints in table order, restricted to `survivors`.
    ///
    /// Root rows need only a resolved value. Clade rows keep surviving members
    /// (sorted) and need at least two of them. Language rows must survive.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::Core`] for a blank language key and
    /// [`CalibrationError::InvalidYear`] for a year-shaped calibration that
    /// does not parse.
    pub fn build(
        &self,
        records: &[LanguageRecord],
        survivors: &BTreeSet<String>,
    ) -> Result<Vec<CalibrationConstraint>, CalibrationError> {
        let mut constraints = Vec::new();

        for record in records {
            let target = match record.target()? {
                CalibrationTarget::Root => CalibrationTarget::Root,
                CalibrationTarget::Clade(members) => {
                    let kept: BTreeSet<String> = members
                        .into_iter()
                        .filter(|member| survivors.contains(member))
                        .collect();
                    if kept.len() < 2 {
                        tracing::debug!(
                            clade = %record.language_key,
                            surviving = kept.len(),
                            "dropping clade calibration"
                        );
                        continue;
                    }
                    CalibrationTarget::Clade(kept.into_iter().collect())
                }
                CalibrationTarget::Language(id) => {
                    if !survivors.contains(&id) {
                        continue;
                    }
                    CalibrationTarget::Language(id)
                }
            };

            let Some(value) = self.resolve_spec(&target, &record.calibration_spec)? else {
                continue;
            };
            constraints.push(CalibrationConstraint { target, value });
        }

        tracing::info!(
            records = records.len(),
            constraints = constraints.len(),
            "built calibration constraints"
        );
        Ok(constraints)
    }

    /// Resolve one calibration spec to its constraint value.
    ///
    /// Returns `Ok(None)` for an empty calibration and for a year too close to
    /// the reference year.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::InvalidYear`] when the calibration looks like
    /// a year but is not a number.
    pub fn resolve_spec(
        &self,
        target: &CalibrationTarget,
        spec: &str,
    ) -> Result<Option<String>, CalibrationError> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Ok(None);
        }

        if !is_year(spec) {
            return Ok(Some(spec.to_string()));
        }

        let year: f64 = spec.parse().map_err(|_| CalibrationError::InvalidYear {
            target: target.to_string(),
            spec: spec.to_string(),
        })?;
        let age = self.reference_year - year;
        if age <= self.min_age {
            return Ok(None);
        }
        Ok(Some(format!("{age:.3}")))
    }
}

fn is_year(spec: &str) -> bool {
    spec.starts_with(|c: char| c.is_ascii_digit()) && !spec.contains('-')
}

/// Render the calibration file body.
#[must_use]
pub fn render_calibration(constraints: &[CalibrationConstraint]) -> String {
    let mut out = String::from(CALIBRATION_HEADER);
    out.push('\n');
    for constraint in constraints {
        let _ = writeln!(out, "{constraint}");
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn record(key: &str, spec: &str) -> LanguageRecord {
        LanguageRecord {
            language_key: key.to_string(),
            nexus_name: String::new(),
            calibration_spec: spec.to_string(),
        }
    }

    fn survivors(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(ToString::to_string).collect()
    }

    #[rstest]
    #[case("1900", Some("120.000"))]
    #[case("1995", Some("25.000"))]
    #[case("2019", Some("1.000"))]
    #[case("2019.95", None)]
    #[case("2020", None)]
    #[case("2050", None)]
    #[case("1.5-2.0", Some("1.5-2.0"))]
    #[case("normal(2.5, 0.2)", Some("normal(2.5, 0.2)"))]
    #[case("", None)]
    #[case("   ", None)]
    fn resolves_specs(#[case] spec: &str, #[case] expected: Option<&str>) {
        let resolved = CalibrationBuilder::default()
            .resolve_spec(&CalibrationTarget::Root, spec)
            .unwrap();
        assert_eq!(resolved.as_deref(), expected);
    }

    #[test]
    fn reference_year_is_configurable() {
        let builder = CalibrationBuilder::new(2000.0, 0.1);
        let resolved = builder
            .resolve_spec(&CalibrationTarget::Root, "1900")
            .unwrap();
        assert_eq!(resolved.as_deref(), Some("100.000"));
    }

    #[test]
    fn year_shaped_garbage_is_fatal() {
        let target = CalibrationTarget::Language("Guarani".into());
        let error = CalibrationBuilder::default()
            .resolve_spec(&target, "19O0")
            .unwrap_err();
        assert!(matches!(
            error,
            CalibrationError::InvalidYear { ref target, ref spec } if target == "Guarani" && spec == "19O0"
        ));
    }

    #[test]
    fn builds_constraints_in_table_order() {
        let records = vec![
            record("ROOT", "2.5-3.5"),
            record("Tupinamba", "1600"),
            record("Kamayura, Guarani, Tupinamba", "1.0-2.0"),
            record("Guarani", ""),
        ];
        let constraints = CalibrationBuilder::default()
            .build(&records, &survivors(&["Guarani", "Tupinamba", "Kamayura"]))
            .unwrap();

        assert_eq!(
            constraints,
            vec![
                CalibrationConstraint {
                    target: CalibrationTarget::Root,
                    value: "2.5-3.5".into(),
                },
                CalibrationConstraint {
                    target: CalibrationTarget::Language("Tupinamba".into()),
                    value: "420.000".into(),
                },
                CalibrationConstraint {
                    target: CalibrationTarget::Clade(vec![
                        "Guarani".into(),
                        "Kamayura".into(),
                        "Tupinamba".into(),
                    ]),
                    value: "1.0-2.0".into(),
                },
            ]
        );
    }

    #[test]
    fn clade_with_one_survivor_is_dropped() {
        let records = vec![record("Guarani, Tupinamba", "1.0-2.0")];
        let constraints = CalibrationBuilder::default()
            .build(&records, &survivors(&["Guarani"]))
            .unwrap();
        assert!(constraints.is_empty());
    }

    #[test]
    fn filtered_language_is_dropped() {
        let records = vec![record("Tupinamba", "1600")];
        let constraints = CalibrationBuilder::default()
            .build(&records, &survivors(&["Guarani"]))
            .unwrap();
        assert!(constraints.is_empty());
    }

    #[test]
    fn root_is_kept_without_survivors() {
        let records = vec![record("ROOT", "1900")];
        let constraints = CalibrationBuilder::default()
            .build(&records, &BTreeSet::new())
            .unwrap();
        assert_eq!(constraints.len(), 1);
        assert_eq!(constraints[0].to_string(), "root = 120.000");
    }

    #[test]
    fn renders_header_and_lines() {
        let constraints = vec![
            CalibrationConstraint {
                target: CalibrationTarget::Root,
                value: "2.5-3.5".into(),
            },
            CalibrationConstraint {
                target: CalibrationTarget::Clade(vec!["Guarani".into(), "Tupinamba".into()]),
                value: "120.000".into(),
            },
        ];
        assert_eq!(
            render_calibration(&constraints),
            "[calibration]\nroot = 2.5-3.5\nGuarani, Tupinamba = 120.000\n"
        );
    }

    #[test]
    fn empty_constraints_render_header_only() {
        assert_eq!(render_calibration(&[]), "[calibration]\n");
    }
}

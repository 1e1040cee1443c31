use std::{collections::HashSet, fmt, sync::Mutex};

use clima_core::City;
use log::warn;

/// A UI choice that may not have been made yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    Unselected,
    Selected(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::Unselected
    }
}

/// Closed set of values a UI control can commit.
pub trait Choice: Sized + Copy + 'static {
    /// Name of the control, for log and error messages.
    const FIELD: &'static str;

    fn all() -> &'static [Self];

    /// Value sent by the control.
    fn value(&self) -> &'static str;

    /// Text shown next to the control.
    fn label(&self) -> &'static str;

    fn from_value(raw: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.value() == raw)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized {field} selection: {value:?}")]
pub struct UnrecognizedSelection {
    pub field: &'static str,
    pub value: String,
}

impl<T: Choice> Selection<T> {
    /// Reads a raw control value. Missing or blank input is `Unselected`.
    pub fn from_input(raw: Option<&str>) -> Result<Self, UnrecognizedSelection> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Selection::Unselected),
            Some(value) => T::from_value(value)
                .map(Selection::Selected)
                .ok_or_else(|| UnrecognizedSelection {
                    field: T::FIELD,
                    value: value.to_string(),
                }),
        }
    }

    pub fn selected(&self) -> Option<T> {
        match self {
            Selection::Unselected => None,
            Selection::Selected(value) => Some(*value),
        }
    }
}

impl Choice for City {
    const FIELD: &'static str = "city";

    fn all() -> &'static [Self] {
        &City::ALL
    }

    fn value(&self) -> &'static str {
        City::label(self)
    }

    fn label(&self) -> &'static str {
        City::label(self)
    }
}

/// Variable plotted in the chart region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartVariable {
    Temperature,
    Wind,
    Precipitation,
}

impl ChartVariable {
    pub const ALL: [ChartVariable; 3] = [
        ChartVariable::Temperature,
        ChartVariable::Wind,
        ChartVariable::Precipitation,
    ];
}

impl Choice for ChartVariable {
    const FIELD: &'static str = "variable";

    fn all() -> &'static [Self] {
        &ChartVariable::ALL
    }

    fn value(&self) -> &'static str {
        match self {
            ChartVariable::Temperature => "Temperatura",
            ChartVariable::Wind => "Vento",
            ChartVariable::Precipitation => "Precipitacao",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ChartVariable::Temperature => "Temperatura",
            ChartVariable::Wind => "Vento",
            ChartVariable::Precipitation => "Precipitação",
        }
    }
}

impl fmt::Display for ChartVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Choice::label(self))
    }
}

/// The two independent dashboard selections. Both start unselected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    city: Selection<City>,
    variable: Selection<ChartVariable>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city(&self) -> Selection<City> {
        self.city
    }

    pub fn variable(&self) -> Selection<ChartVariable> {
        self.variable
    }

    /// Commits a city from the dropdown. An unrecognized value leaves the state unchanged.
    pub fn set_city(&mut self, raw: Option<&str>) -> Result<(), UnrecognizedSelection> {
        self.city = Selection::from_input(raw)?;
        Ok(())
    }

    /// Commits a chart variable from the radio group. An unrecognized value leaves the state unchanged.
    pub fn set_variable(&mut self, raw: Option<&str>) -> Result<(), UnrecognizedSelection> {
        self.variable = Selection::from_input(raw)?;
        Ok(())
    }
}

/// Distinct unrecognized values remembered before reporting stops.
pub const MAX_REMEMBERED: usize = 256;

/// Longest prefix of a value that is kept for comparison.
const MAX_VALUE_LEN: usize = 64;

#[derive(Debug, Default)]
struct Seen {
    values: HashSet<(&'static str, String)>,
    full: bool,
}

/// Remembers which unrecognized values were already reported.
///
/// Holds at most [`MAX_REMEMBERED`] entries; once full, one last warning is
/// logged and further values are dropped silently.
#[derive(Debug, Default)]
pub struct UnrecognizedLog {
    seen: Mutex<Seen>,
}

impl UnrecognizedLog {
    /// Logs a warning the first time a value shows up; returns whether it did.
    pub fn warn_once(&self, err: &UnrecognizedSelection) -> bool {
        let mut seen = self.seen.lock().unwrap_or_else(|e| e.into_inner());
        let key = (err.field, truncated(&err.value));
        if seen.values.contains(&key) {
            return false;
        }
        if seen.values.len() >= MAX_REMEMBERED {
            if !seen.full {
                seen.full = true;
                warn!(
                    "{} distinct unrecognized selections seen, no longer reporting them",
                    MAX_REMEMBERED
                );
            }
            return false;
        }
        seen.values.insert(key);
        warn!("{}, rendering empty state", err);
        true
    }

    /// Number of values currently remembered.
    pub fn len(&self) -> usize {
        let seen = self.seen.lock().unwrap_or_else(|e| e.into_inner());
        seen.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn truncated(value: &str) -> String {
    value.chars().take(MAX_VALUE_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unselected() {
        let state = SelectionState::new();
        assert_eq!(state.city(), Selection::Unselected);
        assert_eq!(state.variable(), Selection::Unselected);
    }

    #[test]
    fn blank_input_is_unselected() {
        assert_eq!(Selection::<City>::from_input(None), Ok(Selection::Unselected));
        assert_eq!(Selection::<City>::from_input(Some("")), Ok(Selection::Unselected));
        assert_eq!(
            Selection::<ChartVariable>::from_input(Some("  ")),
            Ok(Selection::Unselected)
        );
    }

    #[test]
    fn commits_enumeration_members() {
        let mut state = SelectionState::new();
        state.set_city(Some("Porto Alegre")).unwrap();
        state.set_variable(Some("Precipitacao")).unwrap();

        assert_eq!(state.city(), Selection::Selected(City::PortoAlegre));
        assert_eq!(
            state.variable(),
            Selection::Selected(ChartVariable::Precipitation)
        );
    }

    #[test]
    fn selections_are_independent() {
        let mut state = SelectionState::new();
        state.set_variable(Some("Vento")).unwrap();
        state.set_city(None).unwrap();

        assert_eq!(state.variable(), Selection::Selected(ChartVariable::Wind));
        assert_eq!(state.city(), Selection::Unselected);
    }

    #[test]
    fn unrecognized_value_keeps_previous_state() {
        let mut state = SelectionState::new();
        state.set_city(Some("Porto Alegre")).unwrap();

        let err = state.set_city(Some("Gotham")).unwrap_err();
        assert_eq!(
            err,
            UnrecognizedSelection {
                field: "city",
                value: "Gotham".to_string()
            }
        );
        assert_eq!(state.city(), Selection::Selected(City::PortoAlegre));
    }

    #[test]
    fn radio_values_differ_from_labels_only_for_precipitation() {
        for variable in ChartVariable::ALL {
            assert_eq!(ChartVariable::from_value(variable.value()), Some(variable));
        }
        assert_eq!(ChartVariable::Precipitation.label(), "Precipitação");
        assert_eq!(ChartVariable::from_value("Precipitação"), None);
    }

    #[test]
    fn warns_once_per_value() {
        let log = UnrecognizedLog::default();
        let err = UnrecognizedSelection {
            field: "variable",
            value: "Umidade".to_string(),
        };
        assert!(log.warn_once(&err));
        assert!(!log.warn_once(&err));

        let other = UnrecognizedSelection {
            field: "city",
            value: "Umidade".to_string(),
        };
        assert!(log.warn_once(&other));
    }

    fn junk(i: usize) -> UnrecognizedSelection {
        UnrecognizedSelection {
            field: "city",
            value: format!("junk-{}", i),
        }
    }

    #[test]
    fn remembers_a_bounded_number_of_values() {
        let log = UnrecognizedLog::default();
        assert!(log.is_empty());

        let reported = (0..10_000).filter(|i| log.warn_once(&junk(*i))).count();
        assert_eq!(reported, MAX_REMEMBERED);
        assert_eq!(log.len(), MAX_REMEMBERED);

        // values seen before the cap stay suppressed, new ones are dropped
        assert!(!log.warn_once(&junk(0)));
        assert!(!log.warn_once(&junk(20_000)));
        assert_eq!(log.len(), MAX_REMEMBERED);
    }

    #[test]
    fn long_values_are_compared_by_prefix() {
        let log = UnrecognizedLog::default();
        let prefix = "x".repeat(MAX_VALUE_LEN);
        let first = UnrecognizedSelection {
            field: "variable",
            value: format!("{}a", prefix),
        };
        let second = UnrecognizedSelection {
            field: "variable",
            value: format!("{}b", prefix),
        };
        assert!(log.warn_once(&first));
        assert!(!log.warn_once(&second));
        assert_eq!(log.len(), 1);
    }
}

use crate::error::Violation;
use crate::grammar::{
    DataLevel, Extension, Instrument, MAX_REPOINTING, MISSION, is_valid_date, is_valid_version,
};
use crate::parse::FilenameComponents;

/// Run every check over `components` and return all failures.
///
/// Checks are independent of each other; an empty result means the
/// components describe a valid science file.
pub fn validate(components: &FilenameComponents) -> Vec<Violation> {
    let mut violations = Vec::new();

    let required = [
        ("mission", &components.mission),
        ("instrument", &components.instrument),
        ("data_level", &components.data_level),
        ("descriptor", &components.descriptor),
        ("start_date", &components.start_date),
        ("version", &components.version),
        ("extension", &components.extension),
    ];
    violations.extend(
        required
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| Violation::MissingAttribute(*field)),
    );

    if components.mission != MISSION {
        violations.push(Violation::Mission(components.mission.clone()));
    }
    if components.instrument.parse::<Instrument>().is_err() {
        violations.push(Violation::Instrument(components.instrument.clone()));
    }
    if components.data_level.parse::<DataLevel>().is_err() {
        violations.push(Violation::DataLevel(components.data_level.clone()));
    }
    if !is_valid_date(&components.start_date) {
        violations.push(Violation::StartDate(components.start_date.clone()));
    }
    if !is_valid_version(&components.version) {
        violations.push(Violation::Version(components.version.clone()));
    }
    if let Some(repointing) = components.repointing.filter(|r| *r > MAX_REPOINTING) {
        violations.push(Violation::Repointing(repointing));
    }

    let extension_ok = components
        .extension
        .parse::<Extension>()
        .is_ok_and(|ext| ext == Extension::for_level_str(&components.data_level));
    if !extension_ok {
        violations.push(Violation::Extension {
            extension: components.extension.clone(),
            data_level: components.data_level.clone(),
        });
    }

    violations
}

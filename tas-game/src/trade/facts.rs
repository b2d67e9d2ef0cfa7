//! Trade facts: the crew's trade-relevant character data and the profiles
//! of the worlds they trade between.
//!
//! A facts file is validated as a whole first; parsing then reads each
//! world's starport, population and tech level from fixed profile positions
//! and interprets the remaining space-separated tokens as trade codes, base
//! markers and a trailing travel-zone letter.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TradeError;
use crate::bounds::hex_as_int;
use crate::constants::{AMBER_ZONE_TAG, RED_ZONE_TAG};
use crate::world::TradeCode;

const PROFILE_PATTERN: &str =
    r"^[ABCDEX][0-9A][0-9A-F][0-9A][0-9A-C][0-9A-F][0-9]-[0-9A-F]";

const STARPORT_POSITION: usize = 0;
const POPULATION_POSITION: usize = 4;
const TECH_POSITION: usize = 8;

/// Single-letter base markers tolerated in the travel-zone position.
const BASE_MARKERS: [&str; 6] = ["S", "C", "N", "M", "D", "W"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CharacterData {
    #[serde(rename = "highest-steward-skill")]
    pub steward_skill: i32,
    #[serde(rename = "highest-scout-naval-rank")]
    pub scout_naval_rank: i32,
    #[serde(rename = "highest-soc-skill-dm")]
    pub soc_dm: i32,
    pub ship_is_armed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldEntry {
    pub name: String,
    pub uwp: String,
}

/// Raw facts file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TradeFacts {
    pub character_data: CharacterData,
    pub world_data: Vec<WorldEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationProblem {
    #[error("invalid steward skill level: {0}")]
    StewardSkill(i32),
    #[error("invalid scout or naval rank: {0}")]
    ScoutNavalRank(i32),
    #[error("invalid SOC skill DM: {0}")]
    SocDm(i32),
    #[error("world '{world}' has an invalid profile: {uwp}")]
    Profile { world: String, uwp: String },
    #[error("world name '{0}' appears more than once")]
    DuplicateName(String),
}

/// Problems found by [`TradeFacts::validate`], reported together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationProblems(pub Vec<ValidationProblem>);

impl fmt::Display for ValidationProblems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, problem) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{problem}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum TradeFactsError {
    #[error("failed to parse trade facts: {0}")]
    Json(#[from] serde_json::Error),
    #[error("trade facts are invalid: {0}")]
    Invalid(ValidationProblems),
    #[error("world '{world}' has an invalid travel zone marker '{marker}'")]
    ZoneMarker { world: String, marker: String },
    #[error("world '{world}' has a stray single-letter entry '{token}' in its profile")]
    StrayLetter { world: String, token: String },
    #[error("world '{world}' has a garbled profile entry '{token}'")]
    Garbled { world: String, token: String },
    #[error("world '{world}' profile position {position} is unreadable")]
    ProfileDigit { world: String, position: usize },
    #[error("profile pattern failed to compile: {0}")]
    Pattern(String),
}

/// Non-fatal observations made while parsing profiles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseWarning {
    #[error("world '{world}' has an extra space in its profile")]
    ExtraSpace { world: String },
    #[error("world '{world}' carries an unneeded green zone marker")]
    GreenZone { world: String },
    #[error("world '{world}' lists trade code {code} more than once")]
    RedundantCode { world: String, code: String },
    #[error("world '{world}' profile entry '{token}' is treated as a base designation")]
    AssumedBase { world: String, token: String },
}

/// Trade-relevant view of one world.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WorldTradeInfo {
    pub starport: String,
    pub population: i32,
    pub tech_level: i32,
    pub zone_amber: bool,
    pub zone_red: bool,
    pub trade_codes: BTreeSet<String>,
}

impl WorldTradeInfo {
    /// Trade codes plus a tag for each travel zone flag that is set.
    #[must_use]
    pub fn codes_with_zones(&self) -> BTreeSet<String> {
        let mut codes = self.trade_codes.clone();
        if self.zone_amber {
            codes.insert(AMBER_ZONE_TAG.to_string());
        }
        if self.zone_red {
            codes.insert(RED_ZONE_TAG.to_string());
        }
        codes
    }
}

/// Validated and parsed facts, ready for the trade calculators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTradeFacts {
    pub character: CharacterData,
    pub worlds: BTreeMap<String, WorldTradeInfo>,
    pub warnings: Vec<ParseWarning>,
}

impl ParsedTradeFacts {
    /// Look up a world by name; `role` names it in the error ("origin", ...).
    ///
    /// # Errors
    ///
    /// Returns [`TradeError::UnknownWorld`] when the name is not present.
    pub fn world(&self, role: &'static str, name: &str) -> Result<&WorldTradeInfo, TradeError> {
        self.worlds.get(name).ok_or_else(|| TradeError::UnknownWorld {
            role,
            name: name.to_string(),
        })
    }
}

fn profile_pattern() -> Result<&'static Regex, TradeFactsError> {
    static PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(PROFILE_PATTERN))
        .as_ref()
        .map_err(|err| TradeFactsError::Pattern(err.to_string()))
}

fn is_trade_code(token: &str) -> bool {
    TradeCode::ALL.iter().any(|code| code.code() == token)
}

impl TradeFacts {
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a facts file.
    pub fn from_json(json: &str) -> Result<Self, TradeFactsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check character ranges, profile shapes and name uniqueness.
    ///
    /// # Errors
    ///
    /// Returns every problem found as [`TradeFactsError::Invalid`].
    pub fn validate(&self) -> Result<(), TradeFactsError> {
        let mut problems = Vec::new();
        let character = &self.character_data;

        if character.steward_skill != -2 && !(0..=6).contains(&character.steward_skill) {
            problems.push(ValidationProblem::StewardSkill(character.steward_skill));
        }
        if !(0..=6).contains(&character.scout_naval_rank) {
            problems.push(ValidationProblem::ScoutNavalRank(character.scout_naval_rank));
        }
        if !(-3..=3).contains(&character.soc_dm) {
            problems.push(ValidationProblem::SocDm(character.soc_dm));
        }

        let pattern = profile_pattern()?;
        let mut seen = BTreeSet::new();
        for entry in &self.world_data {
            if !pattern.is_match(&entry.uwp) {
                problems.push(ValidationProblem::Profile {
                    world: entry.name.clone(),
                    uwp: entry.uwp.clone(),
                });
            }
            if !seen.insert(entry.name.as_str()) {
                problems.push(ValidationProblem::DuplicateName(entry.name.clone()));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(TradeFactsError::Invalid(ValidationProblems(problems)))
        }
    }

    /// Validate, then parse every world profile.
    ///
    /// # Errors
    ///
    /// Returns validation problems, or the first profile that cannot be
    /// interpreted.
    pub fn parse(&self) -> Result<ParsedTradeFacts, TradeFactsError> {
        self.validate()?;

        let mut parsed = ParsedTradeFacts {
            character: self.character_data,
            ..ParsedTradeFacts::default()
        };
        for entry in &self.world_data {
            let info = parse_profile(entry, &mut parsed.warnings)?;
            parsed.worlds.insert(entry.name.clone(), info);
        }
        for warning in &parsed.warnings {
            log::warn!("{warning}");
        }
        Ok(parsed)
    }
}

fn profile_digit(entry: &WorldEntry, position: usize) -> Result<i32, TradeFactsError> {
    entry
        .uwp
        .chars()
        .nth(position)
        .and_then(|digit| hex_as_int(digit).ok())
        .ok_or_else(|| TradeFactsError::ProfileDigit {
            world: entry.name.clone(),
            position,
        })
}

fn parse_profile(
    entry: &WorldEntry,
    warnings: &mut Vec<ParseWarning>,
) -> Result<WorldTradeInfo, TradeFactsError> {
    let world = &entry.name;
    let mut info = WorldTradeInfo {
        starport: entry
            .uwp
            .chars()
            .nth(STARPORT_POSITION)
            .map(String::from)
            .unwrap_or_default(),
        population: profile_digit(entry, POPULATION_POSITION)?,
        tech_level: profile_digit(entry, TECH_POSITION)?,
        ..WorldTradeInfo::default()
    };

    let tokens: Vec<&str> = entry.uwp.trim().split(' ').collect();
    let last = tokens.len().saturating_sub(1);

    for (idx, token) in tokens.iter().enumerate().skip(1) {
        let token = token.trim();
        match token.len() {
            0 => warnings.push(ParseWarning::ExtraSpace {
                world: world.clone(),
            }),
            1 if idx == last => match token {
                "A" => info.zone_amber = true,
                "R" => info.zone_red = true,
                "G" => warnings.push(ParseWarning::GreenZone {
                    world: world.clone(),
                }),
                marker if BASE_MARKERS.contains(&marker) => {}
                marker => {
                    return Err(TradeFactsError::ZoneMarker {
                        world: world.clone(),
                        marker: marker.to_string(),
                    });
                }
            },
            1 => {
                return Err(TradeFactsError::StrayLetter {
                    world: world.clone(),
                    token: token.to_string(),
                });
            }
            2 if is_trade_code(token) => {
                if !info.trade_codes.insert(token.to_string()) {
                    warnings.push(ParseWarning::RedundantCode {
                        world: world.clone(),
                        code: token.to_string(),
                    });
                }
            }
            2..=6 => warnings.push(ParseWarning::AssumedBase {
                world: world.clone(),
                token: token.to_string(),
            }),
            _ => {
                return Err(TradeFactsError::Garbled {
                    world: world.clone(),
                    token: token.to_string(),
                });
            }
        }
    }
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(worlds: &[(&str, &str)]) -> TradeFacts {
        TradeFacts {
            character_data: CharacterData {
                steward_skill: 1,
                scout_naval_rank: 2,
                soc_dm: 1,
                ship_is_armed: true,
            },
            world_data: worlds
                .iter()
                .map(|(name, uwp)| WorldEntry {
                    name: (*name).to_string(),
                    uwp: (*uwp).to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn reads_fixed_positions_and_codes() {
        let parsed = facts(&[("Regina", "A788899-C HI RI A")])
            .parse()
            .expect("valid facts");
        let regina = parsed.world("origin", "Regina").expect("parsed world");
        assert_eq!(regina.starport, "A");
        assert_eq!(regina.population, 8);
        assert_eq!(regina.tech_level, 12);
        assert!(regina.zone_amber);
        assert!(!regina.zone_red);
        assert_eq!(
            regina.trade_codes.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["HI", "RI"]
        );
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn bare_profile_has_no_codes() {
        let parsed = facts(&[("Rock", "X200000-0")]).parse().expect("valid facts");
        let rock = &parsed.worlds["Rock"];
        assert_eq!(rock.starport, "X");
        assert_eq!(rock.population, 0);
        assert!(rock.trade_codes.is_empty());
    }

    #[test]
    fn low_tech_code_is_recognised() {
        let parsed = facts(&[("Backwater", "C543465-4 NI LT")])
            .parse()
            .expect("valid facts");
        assert!(parsed.worlds["Backwater"].trade_codes.contains("LT"));
    }

    #[test]
    fn tolerated_entries_produce_warnings() {
        let parsed = facts(&[("Noisy", "B564500-B  NS AG AG NSW G")])
            .parse()
            .expect("valid facts");
        assert_eq!(
            parsed.warnings,
            vec![
                ParseWarning::ExtraSpace {
                    world: "Noisy".to_string()
                },
                ParseWarning::AssumedBase {
                    world: "Noisy".to_string(),
                    token: "NS".to_string()
                },
                ParseWarning::RedundantCode {
                    world: "Noisy".to_string(),
                    code: "AG".to_string()
                },
                ParseWarning::AssumedBase {
                    world: "Noisy".to_string(),
                    token: "NSW".to_string()
                },
                ParseWarning::GreenZone {
                    world: "Noisy".to_string()
                },
            ]
        );
        assert!(parsed.worlds["Noisy"].trade_codes.contains("AG"));
    }

    #[test]
    fn trailing_base_letter_is_ignored() {
        let parsed = facts(&[("Port", "C566777-8 N")]).parse().expect("valid facts");
        assert!(!parsed.worlds["Port"].zone_amber);
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn bad_entries_are_rejected() {
        let err = facts(&[("Odd", "C566777-8 Q")]).parse().expect_err("bad zone");
        assert!(matches!(err, TradeFactsError::ZoneMarker { ref marker, .. } if marker == "Q"));

        let err = facts(&[("Odd", "C566777-8 A NI")]).parse().expect_err("stray letter");
        assert!(matches!(err, TradeFactsError::StrayLetter { .. }));

        let err = facts(&[("Odd", "C566777-8 GARBLEDX")])
            .parse()
            .expect_err("garbled entry");
        assert!(matches!(err, TradeFactsError::Garbled { .. }));
    }

    #[test]
    fn validation_collects_every_problem() {
        let mut bad = facts(&[("Twin", "A788899-C"), ("Twin", "Z788899-C")]);
        bad.character_data.steward_skill = -1;
        bad.character_data.scout_naval_rank = 7;
        bad.character_data.soc_dm = 4;
        let err = bad.validate().expect_err("invalid facts");
        let TradeFactsError::Invalid(ValidationProblems(problems)) = err else {
            panic!("expected validation problems");
        };
        assert_eq!(
            problems,
            vec![
                ValidationProblem::StewardSkill(-1),
                ValidationProblem::ScoutNavalRank(7),
                ValidationProblem::SocDm(4),
                ValidationProblem::Profile {
                    world: "Twin".to_string(),
                    uwp: "Z788899-C".to_string()
                },
                ValidationProblem::DuplicateName("Twin".to_string()),
            ]
        );
    }

    #[test]
    fn untrained_steward_is_allowed() {
        let mut ok = facts(&[("Home", "B564500-B")]);
        ok.character_data.steward_skill = -2;
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn json_keys_follow_file_format() {
        let json = r#"{
            "character-data": {
                "highest-steward-skill": 0,
                "highest-scout-naval-rank": 1,
                "highest-soc-skill-dm": -1,
                "ship-is-armed": false
            },
            "world-data": [{"name": "Home", "uwp": "B564500-B AG NI"}]
        }"#;
        let facts = TradeFacts::from_json(json).expect("facts parse");
        assert_eq!(facts.character_data.scout_naval_rank, 1);
        assert_eq!(facts.character_data.soc_dm, -1);
        assert_eq!(facts.world_data[0].name, "Home");
    }

    #[test]
    fn zone_tags_join_trade_codes() {
        let info = WorldTradeInfo {
            zone_amber: true,
            zone_red: true,
            trade_codes: ["IN".to_string()].into_iter().collect(),
            ..WorldTradeInfo::default()
        };
        let codes = info.codes_with_zones();
        assert!(codes.contains(AMBER_ZONE_TAG));
        assert!(codes.contains(RED_ZONE_TAG));
        assert!(codes.contains("IN"));
        assert_eq!(info.trade_codes.len(), 1);
    }
}

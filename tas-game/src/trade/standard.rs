//! Standard trade: DMs for the passenger, freight and mail traffic rolls
//! between two worlds.

use serde::{Deserialize, Serialize};

use super::TradeError;
use super::facts::{CharacterData, ParsedTradeFacts, WorldTradeInfo};
use crate::dice::Dice;
use crate::dm::{Predicate, adjust_dm, adjust_starport_dm, adjust_zone_dm};

/// Starport letter modifiers shared by passenger and freight traffic.
const STARPORT_DMS: [(&str, i32); 4] = [("A", 2), ("B", 1), ("E", -1), ("X", -3)];

/// Freight traffic DM before the per-cargo offsets.
///
/// Only [`freight_trade`] produces one, so mail can never be computed
/// before freight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreightCoreDm(i32);

impl FreightCoreDm {
    pub(crate) const fn new(value: i32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PassageKind {
    High,
    Middle,
    Basic,
    Low,
}

impl PassageKind {
    pub const ALL: [Self; 4] = [Self::High, Self::Middle, Self::Basic, Self::Low];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Middle => "middle",
            Self::Basic => "basic",
            Self::Low => "low",
        }
    }

    const fn offset(self) -> i32 {
        match self {
            Self::High => -4,
            Self::Middle | Self::Basic => 0,
            Self::Low => 1,
        }
    }

    #[must_use]
    pub const fn requirements(self) -> &'static str {
        match self {
            Self::High => {
                "Each passenger needs a stateroom and 1 ton of cargo space; one steward per 10 passengers."
            }
            Self::Middle => {
                "Each passenger needs a stateroom and 100kg of cargo space; one steward per 100 passengers."
            }
            Self::Basic => {
                "Each passenger needs half a stateroom and 10kg of cargo space, plus 2 tons of shared space for all basic passengers."
            }
            Self::Low => "Each passenger needs a low berth and 10kg of cargo space.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CargoKind {
    Major,
    Minor,
    Incidental,
}

impl CargoKind {
    pub const ALL: [Self; 3] = [Self::Major, Self::Minor, Self::Incidental];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Incidental => "incidental",
        }
    }

    const fn offset(self) -> i32 {
        match self {
            Self::Major => -4,
            Self::Minor => 0,
            Self::Incidental => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerDm {
    #[serde(rename = "type")]
    pub kind: PassageKind,
    pub dm: i32,
    pub requirements: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerTradeSummary {
    pub dms: Vec<PassengerDm>,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FreightDm {
    pub lot_type: CargoKind,
    pub dm: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreightTradeSummary {
    pub dms: Vec<FreightDm>,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MailTradeSummary {
    pub dm: i32,
    pub lots_avail: i32,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StandardTradeModifiers {
    pub from_world: String,
    pub to_world: String,
    pub passenger_trade: PassengerTradeSummary,
    pub freight_trade: FreightTradeSummary,
    pub mail_trade: MailTradeSummary,
}

impl StandardTradeModifiers {
    /// JSON output file name; `timestamp` is supplied by the caller.
    #[must_use]
    pub fn file_name(&self, timestamp: &str) -> String {
        format!("stdtrade_{}_{}-{timestamp}.json", self.from_world, self.to_world)
    }
}

const PASSENGER_NOTES: [&str; 3] = [
    "Add the Effect of an 8+ Broker, Carouse or Streetwise check to each DM.",
    "Apply DM-1 for every parsec beyond the first.",
    "Roll on the passenger traffic table with the final DM to find the passengers at each berth level.",
];

const FREIGHT_NOTES: [&str; 4] = [
    "Add the Effect of an 8+ Broker or Streetwise check to each DM.",
    "Apply DM-1 for every parsec beyond the first.",
    "Roll on the freight traffic table with the final DM for the lots in each category. Lots are all or nothing and paid on delivery.",
    "Late delivery carries a penalty.",
];

const MAIL_NOTES: [&str; 3] = [
    "Roll 2D plus the mail DM; on 12+ the ship is entrusted with the mail.",
    "Each lot is 5 tons and pays Cr25000 on delivery. All lots are taken or none.",
    "Distance does not change the mail payment.",
];

fn notes(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| (*line).to_string()).collect()
}

fn starport_dm(mut core: i32, from: &WorldTradeInfo, to: &WorldTradeInfo) -> i32 {
    for (letter, delta) in STARPORT_DMS {
        core = adjust_starport_dm(core, delta, &from.starport, letter);
        core = adjust_starport_dm(core, delta, &to.starport, letter);
    }
    core
}

/// Passenger traffic DMs, starting from the crew's best steward skill.
#[must_use]
pub fn passenger_trade(
    from: &WorldTradeInfo,
    to: &WorldTradeInfo,
    character: &CharacterData,
) -> PassengerTradeSummary {
    let mut core = starport_dm(character.steward_skill, from, to);

    for world in [from, to] {
        core = adjust_zone_dm(core, 1, world.zone_amber);
        core = adjust_zone_dm(core, -4, world.zone_red);
    }

    for world in [from, to] {
        core = adjust_dm(core, -4, world.population, Predicate::Le, &[1]);
    }
    core = adjust_dm(core, 1, from.population, Predicate::InRange, &[6, 7]);
    for world in [from, to] {
        core = adjust_dm(core, 3, world.population, Predicate::Ge, &[8]);
    }
    log::debug!("passenger core DM: {core}");

    PassengerTradeSummary {
        dms: PassageKind::ALL
            .into_iter()
            .map(|kind| PassengerDm {
                kind,
                dm: core + kind.offset(),
                requirements: kind.requirements().to_string(),
            })
            .collect(),
        notes: notes(&PASSENGER_NOTES),
    }
}

/// Freight traffic DMs, plus the core value mail traffic is derived from.
#[must_use]
pub fn freight_trade(
    from: &WorldTradeInfo,
    to: &WorldTradeInfo,
) -> (FreightCoreDm, FreightTradeSummary) {
    let mut core = starport_dm(0, from, to);

    for world in [from, to] {
        core = adjust_zone_dm(core, -2, world.zone_amber);
        core = adjust_zone_dm(core, -6, world.zone_red);
    }

    for world in [from, to] {
        core = adjust_dm(core, -4, world.population, Predicate::Le, &[1]);
        core = adjust_dm(core, 2, world.population, Predicate::InRange, &[6, 7]);
        core = adjust_dm(core, 4, world.population, Predicate::Ge, &[8]);
    }

    for world in [from, to] {
        core = adjust_dm(core, -1, world.tech_level, Predicate::Le, &[6]);
        core = adjust_dm(core, 2, world.tech_level, Predicate::Ge, &[9]);
    }
    log::debug!("freight core DM: {core}");

    let summary = FreightTradeSummary {
        dms: CargoKind::ALL
            .into_iter()
            .map(|lot_type| FreightDm {
                lot_type,
                dm: core + lot_type.offset(),
            })
            .collect(),
        notes: notes(&FREIGHT_NOTES),
    };
    (FreightCoreDm::new(core), summary)
}

/// Mail DM and the number of lots on offer.
#[must_use]
pub fn mail_trade(
    from: &WorldTradeInfo,
    freight: FreightCoreDm,
    character: &CharacterData,
    dice: &mut dyn Dice,
) -> MailTradeSummary {
    let core = freight.value();
    let mut dm = character.scout_naval_rank + character.soc_dm;

    dm = adjust_dm(dm, -2, core, Predicate::Le, &[-10]);
    dm = adjust_dm(dm, -1, core, Predicate::InRange, &[-9, -5]);
    dm = adjust_dm(dm, 1, core, Predicate::InRange, &[5, 9]);
    dm = adjust_dm(dm, 2, core, Predicate::Ge, &[10]);

    dm = adjust_dm(dm, -4, from.tech_level, Predicate::Le, &[5]);
    dm = adjust_zone_dm(dm, 2, character.ship_is_armed);
    log::debug!("mail DM: {dm}");

    MailTradeSummary {
        dm,
        lots_avail: dice.d6(),
        notes: notes(&MAIL_NOTES),
    }
}

/// Passenger, freight and mail modifiers for a run from `from` to `to`.
///
/// # Errors
///
/// Returns [`TradeError::UnknownWorld`] when either world is missing from
/// the trade facts.
pub fn generate_standard_trade(
    facts: &ParsedTradeFacts,
    from: &str,
    to: &str,
    dice: &mut dyn Dice,
) -> Result<StandardTradeModifiers, TradeError> {
    let origin = facts.world("origin", from)?;
    let destination = facts.world("destination", to)?;
    log::info!("standard trade from {from} to {to}");

    let passenger_trade = passenger_trade(origin, destination, &facts.character);
    let (core, freight_trade) = freight_trade(origin, destination);
    let mail_trade = mail_trade(origin, core, &facts.character, dice);

    log::info!("standard trade complete");
    Ok(StandardTradeModifiers {
        from_world: from.to_string(),
        to_world: to.to_string(),
        passenger_trade,
        freight_trade,
        mail_trade,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::LoadedDice;

    fn world(starport: &str, population: i32, tech_level: i32) -> WorldTradeInfo {
        WorldTradeInfo {
            starport: starport.to_string(),
            population,
            tech_level,
            ..WorldTradeInfo::default()
        }
    }

    fn crew() -> CharacterData {
        CharacterData {
            steward_skill: 1,
            scout_naval_rank: 2,
            soc_dm: 1,
            ship_is_armed: false,
        }
    }

    #[test]
    fn passenger_dms_chain_every_modifier() {
        // steward 1, A +2, B +1, origin pop 7 +1, destination pop 8 +3
        let summary = passenger_trade(&world("A", 7, 10), &world("B", 8, 10), &crew());
        let dms: Vec<(PassageKind, i32)> =
            summary.dms.iter().map(|entry| (entry.kind, entry.dm)).collect();
        assert_eq!(
            dms,
            vec![
                (PassageKind::High, 4),
                (PassageKind::Middle, 8),
                (PassageKind::Basic, 8),
                (PassageKind::Low, 9),
            ]
        );
    }

    #[test]
    fn passenger_mid_population_bonus_is_origin_only() {
        let origin_only = passenger_trade(&world("C", 6, 8), &world("C", 5, 8), &crew());
        let destination_only = passenger_trade(&world("C", 5, 8), &world("C", 6, 8), &crew());
        assert_eq!(origin_only.dms[1].dm, 2);
        assert_eq!(destination_only.dms[1].dm, 1);
    }

    #[test]
    fn zones_pull_passengers_and_freight_differently() {
        let mut amber = world("C", 5, 8);
        amber.zone_amber = true;
        let mut red = world("C", 5, 8);
        red.zone_red = true;

        let passengers = passenger_trade(&amber, &red, &crew());
        assert_eq!(passengers.dms[1].dm, 1 + 1 - 4);

        let (core, _) = freight_trade(&amber, &red);
        assert_eq!(core.value(), -2 - 6);
    }

    #[test]
    fn freight_offsets_follow_cargo_size() {
        // X -3, E -1, pop 0 -4, pop 9 +4, tech 5 -1, tech 12 +2
        let (core, summary) = freight_trade(&world("X", 0, 5), &world("E", 9, 12));
        assert_eq!(core.value(), -3);
        let dms: Vec<i32> = summary.dms.iter().map(|entry| entry.dm).collect();
        assert_eq!(dms, vec![-7, -3, -1]);
    }

    #[test]
    fn mail_uses_freight_core_bands() {
        let character = crew();
        let from = world("C", 5, 8);
        let cases = [(-12, 1), (-10, 1), (-9, 2), (-5, 2), (0, 3), (4, 3), (5, 4), (9, 4), (10, 5), (15, 5)];
        for (core, expected) in cases {
            let mail = mail_trade(&from, FreightCoreDm::new(core), &character, &mut LoadedDice::new([4]));
            assert_eq!(mail.dm, expected, "freight core {core}");
            assert_eq!(mail.lots_avail, 4);
        }
    }

    #[test]
    fn mail_penalises_low_tech_and_rewards_arms() {
        let mut character = crew();
        character.ship_is_armed = true;
        let mail = mail_trade(&world("C", 5, 5), FreightCoreDm::new(0), &character, &mut LoadedDice::new([2]));
        assert_eq!(mail.dm, 3 - 4 + 2);
    }

    #[test]
    fn standard_trade_requires_known_worlds() {
        let mut facts = ParsedTradeFacts {
            character: crew(),
            ..ParsedTradeFacts::default()
        };
        facts.worlds.insert("Home".to_string(), world("A", 8, 12));
        facts.worlds.insert("Away".to_string(), world("C", 4, 7));

        let err = generate_standard_trade(&facts, "Home", "Nowhere", &mut LoadedDice::new([3]))
            .expect_err("destination is missing");
        assert_eq!(
            err,
            TradeError::UnknownWorld {
                role: "destination",
                name: "Nowhere".to_string()
            }
        );

        let trade = generate_standard_trade(&facts, "Home", "Away", &mut LoadedDice::new([3]))
            .expect("both worlds are known");
        assert_eq!(trade.freight_trade.dms.len(), 3);
        assert_eq!(trade.passenger_trade.dms.len(), 4);
        assert_eq!(trade.mail_trade.lots_avail, 3);
        assert_eq!(trade.file_name("20240102030405"), "stdtrade_Home_Away-20240102030405.json");

        let json = serde_json::to_value(&trade).expect("modifiers serialize");
        assert_eq!(json["freight-trade"]["dms"][0]["lot-type"], "major");
        assert_eq!(json["passenger-trade"]["dms"][3]["type"], "low");
    }
}

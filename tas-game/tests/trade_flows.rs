use std::collections::BTreeSet;

use tas_game::trade::speculative::{consolidate_lots, generate_trade_lots};
use tas_game::trade::standard::{freight_trade, mail_trade};
use tas_game::{
    LoadedDice, RollStream, SpeculativeTradeLot, TradeError, TradeFacts, TradeFactsError,
    TradeGoodsTable, Transaction, WorldTradeInfo, generate_speculative_trade,
    generate_standard_trade,
};

const FACTS: &str = r#"{
    "character-data": {
        "highest-steward-skill": 2,
        "highest-scout-naval-rank": 3,
        "highest-soc-skill-dm": 1,
        "ship-is-armed": true
    },
    "world-data": [
        {"name": "Regina", "uwp": "A788899-C HI RI"},
        {"name": "Efate", "uwp": "A646930-D HI IN A"},
        {"name": "Ruie", "uwp": "E300000-0 BA VA R"}
    ]
}"#;

fn goods() -> &'static TradeGoodsTable {
    TradeGoodsTable::embedded().expect("embedded goods")
}

fn world(population: i32, codes: &[&str]) -> WorldTradeInfo {
    WorldTradeInfo {
        starport: "C".to_string(),
        population,
        tech_level: 8,
        trade_codes: codes.iter().map(|code| (*code).to_string()).collect::<BTreeSet<_>>(),
        ..WorldTradeInfo::default()
    }
}

fn has_kind(lots: &[SpeculativeTradeLot], kind: &str) -> bool {
    lots.iter().any(|lot| lot.kind == kind)
}

#[test]
fn common_goods_appear_on_every_world() {
    let manufactured = goods().get(13).expect("goods 13").kind.clone();
    let mut dice = RollStream::seeded(3);
    for codes in [&["AG"][..], &["IN", "HT"], &[]] {
        // population 5: no availability penalty, so every roll is positive
        let lots = generate_trade_lots(&world(5, codes), goods(), &mut dice);
        assert!(has_kind(&lots, &manufactured), "{codes:?}");
    }
}

#[test]
fn advanced_goods_need_matching_codes() {
    let vehicles = goods().get(25).expect("goods 25").kind.clone();
    let mut dice = RollStream::seeded(9);
    // population 0 skips the filler pass, so only qualified goods appear
    let barren = generate_trade_lots(&world(0, &["BA"]), goods(), &mut dice);
    assert!(!has_kind(&barren, &vehicles));

    let high_tech = generate_trade_lots(&world(0, &["HT"]), goods(), &mut LoadedDice::new([]).with_fallback(6));
    assert!(has_kind(&high_tech, &vehicles));
}

#[test]
fn consolidated_lots_have_one_entry_per_kind() {
    let raw: Vec<SpeculativeTradeLot> = [(1, "Basic Electronics", 6), (2, "Basic Ore", 40), (3, "Basic Electronics", 9)]
        .into_iter()
        .map(|(lot_id, kind, tons)| SpeculativeTradeLot {
            lot_id,
            kind: kind.to_string(),
            tons_available: tons,
            ..SpeculativeTradeLot::default()
        })
        .collect();
    let merged = consolidate_lots(raw);
    let electronics: Vec<_> = merged.iter().filter(|lot| lot.kind == "Basic Electronics").collect();
    assert_eq!(electronics.len(), 1);
    assert_eq!(electronics[0].tons_available, 15);
    assert_eq!(merged.len(), 2);

    let mut dice = RollStream::seeded(77);
    let lots = generate_trade_lots(&world(12, &["HI", "IN"]), goods(), &mut dice);
    let kinds: BTreeSet<&str> = lots.iter().map(|lot| lot.kind.as_str()).collect();
    assert_eq!(kinds.len(), lots.len());
    let ids: Vec<i32> = lots.iter().map(|lot| lot.lot_id).collect();
    assert_eq!(ids, (1..=tas_game::numbers::usize_to_i32(lots.len())).collect::<Vec<_>>());
}

#[test]
fn facts_drive_speculative_and_standard_trade() {
    let facts = TradeFacts::from_json(FACTS).expect("facts parse");
    let parsed = facts.parse().expect("facts are valid");
    assert_eq!(parsed.worlds.len(), 3);
    assert!(parsed.worlds["Ruie"].zone_red);

    let efate = parsed.world("local", "Efate").expect("Efate is listed");
    let sale = generate_speculative_trade("Efate", efate, goods(), Transaction::Sell, &mut LoadedDice::new([]));
    assert_eq!(sale.trade_lots.len(), goods().len());
    assert_eq!(sale.find_supplier_broker, 6);

    let mut dice = RollStream::seeded(1);
    let trade = generate_standard_trade(&parsed, "Regina", "Efate", &mut dice).expect("both known");
    // A +2 twice, amber destination -2, population 8 and 9 +4 each, tech 12 and 13 +2 each
    assert_eq!(trade.freight_trade.dms[1].dm, 2 + 2 - 2 + 4 + 4 + 2 + 2);
    // rank 3 + SOC 1, freight core 14 gives +2, armed ship +2
    assert_eq!(trade.mail_trade.dm, 8);
    assert!((1..=6).contains(&trade.mail_trade.lots_avail));

    let err = generate_standard_trade(&parsed, "Capital", "Efate", &mut dice).expect_err("unknown origin");
    assert!(matches!(err, TradeError::UnknownWorld { role: "origin", .. }));
}

#[test]
fn mail_follows_freight() {
    let from = world(7, &[]);
    let to = world(8, &[]);
    let (core, _) = freight_trade(&from, &to);
    let character = TradeFacts::from_json(FACTS).expect("facts parse").character_data;
    let mail = mail_trade(&from, core, &character, &mut LoadedDice::new([5]));
    // core: population 7 +2, population 8 +4 -> 6, band +1
    assert_eq!(core.value(), 6);
    assert_eq!(mail.dm, 3 + 1 + 1 + 2);
    assert_eq!(mail.lots_avail, 5);
}

#[test]
fn invalid_facts_are_rejected_before_parsing() {
    let broken = FACTS.replace("\"highest-soc-skill-dm\": 1", "\"highest-soc-skill-dm\": 5");
    let facts = TradeFacts::from_json(&broken).expect("still JSON");
    assert!(matches!(facts.parse(), Err(TradeFactsError::Invalid(_))));

    assert!(matches!(TradeFacts::from_json("{"), Err(TradeFactsError::Json(_))));
}

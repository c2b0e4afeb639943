//! Example Game - A scripted duel demonstrating combat_core
//!
//! Runs a seeded fight between a warrior and a crab: auto-attack rounds
//! build TP, two weapon skills form a Fusion -> Liquefaction skillchain, and
//! a fire spell magic-bursts against the open chain step. Pass a seed as the
//! first argument to replay a specific fight.

use combat_core::{
    advance, resolve_auto_attack, resolve_spell, resolve_weapon_skill, Actor, ActorId, ActorKind,
    AttackContext, Attribute, BonusAggregator, ChainAttribute, ChainOutcome, ChainState,
    ContentRegistry, Element, EquipSlot, Equipped, FtpCurve, ItemDefinition, ItemId, Job,
    Modifier, MonsterDefinition, MonsterId, Rolls, ScalarBonus, SpellDefinition, SpellId,
    SpellKind, WeaponDefinition, WeaponSkillDefinition, WeaponSkillId, WeaponSkillKind,
};

fn build_content() -> ContentRegistry {
    let mut content = ContentRegistry::new();

    content.register_item(ItemDefinition {
        id: ItemId(1),
        name: "Bronze Sword".to_string(),
        slot: EquipSlot::MainHand,
        stats: vec![Modifier::scalar(ScalarBonus::Accuracy, 10)],
        traits: vec![],
        static_augments: vec![],
        weapon: Some(WeaponDefinition {
            power: 28,
            delay: 240,
            h2h: false,
            magic_power: 0,
        }),
    });

    content.register_monster(MonsterDefinition {
        id: MonsterId(1),
        name: "Stone Crab".to_string(),
        base_damage: 14,
        base_delay: 300,
        bonuses: vec![Modifier::scalar(ScalarBonus::Defense, 20)],
        exp_scalar: 1.0,
        drop_scalar: 1.0,
        harvest_node: false,
    });

    content.register_weapon_skill(WeaponSkillDefinition {
        id: WeaponSkillId(1),
        name: "Burning Blade".to_string(),
        kind: WeaponSkillKind::Physical,
        element: Some(Element::Fire),
        hits: 1,
        attribute: Attribute::Str,
        secondary_attribute: None,
        chain_attributes: vec![ChainAttribute::Fusion],
        ftp: FtpCurve {
            points: vec![(0, 1.0), (1000, 2.0), (2000, 3.0)],
        },
        ftp_spread: false,
        consumes_all_tp: true,
    });

    content.register_weapon_skill(WeaponSkillDefinition {
        id: WeaponSkillId(2),
        name: "Red Lotus Blade".to_string(),
        kind: WeaponSkillKind::Physical,
        element: Some(Element::Fire),
        hits: 1,
        attribute: Attribute::Str,
        secondary_attribute: Some((Attribute::Int, 0.3)),
        chain_attributes: vec![ChainAttribute::Liquefaction],
        ftp: FtpCurve {
            points: vec![(0, 1.5), (2000, 2.5)],
        },
        ftp_spread: false,
        consumes_all_tp: true,
    });

    content.register_spell(SpellDefinition {
        id: SpellId(1),
        name: "Fire".to_string(),
        kind: SpellKind::Elemental,
        element: Element::Fire,
        mp_cost: 30,
        cast_time: 3.0,
        recast_time: 6.0,
        attack_attribute: Attribute::Int,
        defense_attribute: Attribute::Int,
    });

    content
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(rand::random::<u64>);
    println!("=== Duel (seed {seed}) ===");

    let content = build_content();
    let mut rolls = Rolls::from_seed(seed);
    let mut aggregator = BonusAggregator::new();

    let mut player = Actor::new(ActorId(1), ActorKind::Player, 50)
        .with_attribute(Attribute::Str, 52)
        .with_attribute(Attribute::Dex, 48)
        .with_attribute(Attribute::Agi, 45)
        .with_attribute(Attribute::Int, 40)
        .with_job(Job::Warrior);
    player.has_enmity = true;
    player
        .equipment
        .insert(EquipSlot::MainHand, Equipped::bare(ItemId(1)));

    let mut crab = Actor::new(ActorId(2), ActorKind::Monster(MonsterId(1)), 48)
        .with_attribute(Attribute::Vit, 55)
        .with_attribute(Attribute::Agi, 40);
    crab.max_hp = 900;
    crab.hp = 900;
    crab.has_enmity = true;

    let mut chain: Option<ChainState> = None;
    let mut used_opener = false;
    let mut now = 0.0;

    for round in 1..=30 {
        // One aggregate rebuild per tick.
        aggregator.clear();
        let player_bonuses = aggregator.get(&player, &content).unwrap().clone();
        let crab_bonuses = aggregator.get(&crab, &content).unwrap().clone();

        if player.tp >= 1000 {
            // Weapon skill: open the chain first, then close it.
            let skill_id = if used_opener {
                WeaponSkillId(2)
            } else {
                WeaponSkillId(1)
            };
            let skill_name = content.weapon_skill(skill_id).unwrap().name.clone();
            let result = {
                let ctx = AttackContext {
                    attacker: &player,
                    defender: &crab,
                    attacker_bonuses: &player_bonuses,
                    defender_bonuses: &crab_bonuses,
                    content: &content,
                };
                resolve_weapon_skill(&ctx, skill_id, player.tp, &mut rolls).unwrap()
            };
            player.tp -= result.tp_spent;
            player.tp += result.tp_gained;
            crab.tp += result.target_tp_gained;
            let mut damage = result.total_damage();

            let attrs = &content.weapon_skill(skill_id).unwrap().chain_attributes;
            let outcome = advance(chain.as_ref(), attrs, now, 0.0, &content.constants.chain);
            if let ChainOutcome::Advanced { link, .. } = &outcome {
                let bonus = (damage as f64
                    * link.damage_multiplier(
                        &content.constants.chain,
                        player_bonuses.skillchain_damage,
                    )) as i32;
                println!(
                    "[{round:>2}] {skill_name}: {} ({:?} skillchain, +{bonus})",
                    result.summary(),
                    link.attribute,
                );
                damage += bonus;
            } else {
                println!("[{round:>2}] {skill_name}: {}", result.summary());
            }
            chain = outcome.state().cloned();
            crab.hp -= damage;
            used_opener = true;

            // Follow a closed chain with a burst spell.
            if matches!(&chain, Some(ChainState::Step { .. })) && player.mp >= 30 {
                let spell = {
                    let ctx = AttackContext {
                        attacker: &player,
                        defender: &crab,
                        attacker_bonuses: &player_bonuses,
                        defender_bonuses: &crab_bonuses,
                        content: &content,
                    };
                    resolve_spell(&ctx, SpellId(1), 80.0, 30, chain.as_ref(), now + 1.0, &mut rolls)
                        .unwrap()
                };
                player.mp -= spell.mp_spent;
                crab.hp -= spell.damage;
                println!("[{round:>2}] Fire: {}", spell.summary());
            }
        } else {
            let result = {
                let ctx = AttackContext {
                    attacker: &player,
                    defender: &crab,
                    attacker_bonuses: &player_bonuses,
                    defender_bonuses: &crab_bonuses,
                    content: &content,
                };
                resolve_auto_attack(&ctx, &mut rolls).unwrap()
            };
            player.tp += result.tp_gained;
            crab.tp += result.target_tp_gained;
            crab.hp -= result.total_damage();
            println!("[{round:>2}] Attack: {}", result.summary());
        }

        if crab.hp <= 0 {
            println!("=== The Stone Crab falls after {round} round(s) ===");
            return;
        }
        now += 3.0;
    }

    println!("=== The crab survives with {} HP ===", crab.hp);
}

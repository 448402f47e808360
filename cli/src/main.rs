//! crit CLI: driving adapter for the rule engine and tag generator.
//!
//! Subcommands:
//! - `check <rule>`: validate a rule file against the sample universe
//! - `eval <rule> --stack key=value...`: evaluate a rule against a stack
//! - `gen <out-dir>`: write the built-in tag files
//! - `info`: print the registered content ids

use std::process;

use crit::{Ident, ItemPredicate, ItemStack, Registries};
use crit_datagen::{GameEventTagProvider, Generator, TagProvider as _};
use crit_test::sample_registries;
use serde_json::Value;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "check" => cmd_check(&args[2..]),
        "eval" => cmd_eval(&args[2..]),
        "gen" => cmd_gen(&args[2..]),
        "info" => cmd_info(),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_check(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        return Err("check requires a rule file path".into());
    }

    let rule = load_rule(&args[0])?;
    let registries = sample_registries();
    ItemPredicate::from_json(&registries, &rule).map_err(|e| format!("rule invalid: {e}"))?;

    println!("Rule valid");
    Ok(())
}

fn cmd_eval(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        return Err("eval requires a rule file path".into());
    }

    let rule_json = load_rule(&args[0])?;
    let registries = sample_registries();
    let rule = ItemPredicate::from_json(&registries, &rule_json)
        .map_err(|e| format!("rule load failed: {e}"))?;

    let stack = parse_stack(&args[1..], &registries)?;
    if rule.matches(&registries, &stack) {
        println!("matches");
    } else {
        println!("no match");
    }

    Ok(())
}

fn cmd_gen(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        return Err("gen requires an output directory".into());
    }

    let generator = Generator::new(&args[0]);
    let provider = GameEventTagProvider::new();
    let written = generator
        .run(&[&provider])
        .map_err(|e| format!("{} failed: {e}", provider.name()))?;

    for path in &written {
        println!("wrote {}", path.display());
    }
    println!("{} file(s) generated", written.len());
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // Uniform return type for all commands
fn cmd_info() -> Result<(), String> {
    let registries = sample_registries();

    println!("Items:");
    for id in registries.items().ids() {
        println!("  {id}");
    }

    println!("\nEnchantments:");
    for id in registries.enchantments().ids() {
        println!("  {id}");
    }

    println!("\nPotions:");
    for id in registries.potions().ids() {
        println!("  {id}");
    }

    println!("\nItem tags:");
    for id in registries.item_tags().ids() {
        println!("  {id}");
    }

    println!("\nGame events:");
    for id in crit_datagen::game_event_registry().ids() {
        println!("  {id}");
    }

    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rule loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load_rule(path: &str) -> Result<Value, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read \"{path}\": {e}"))?;

    let is_json = std::path::Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content).map_err(|e| format!("JSON parse error: {e}"))
    } else {
        // Default to YAML (handles .yaml and .yml)
        serde_yaml::from_str(&content).map_err(|e| format!("YAML parse error: {e}"))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Stack parsing
// ═══════════════════════════════════════════════════════════════════════════════

fn parse_stack(args: &[String], registries: &Registries) -> Result<ItemStack, String> {
    let mut pairs = Vec::new();
    let mut i = 0;

    while i < args.len() {
        if args[i] == "--stack" {
            i += 1;
            while i < args.len() && !args[i].starts_with("--") {
                let pair = &args[i];
                let (key, value) = pair
                    .split_once('=')
                    .ok_or_else(|| format!("invalid stack pair \"{pair}\", expected key=value"))?;
                pairs.push((key.to_owned(), value.to_owned()));
                i += 1;
            }
        } else {
            return Err(format!("unexpected argument \"{}\"", args[i]));
        }
    }

    build_stack(&pairs, registries)
}

fn build_stack(pairs: &[(String, String)], registries: &Registries) -> Result<ItemStack, String> {
    let item = pairs
        .iter()
        .find(|(key, _)| key == "item")
        .map(|(_, value)| value)
        .ok_or("stack needs an item=<id> pair")?;
    let item: Ident = item.parse().map_err(|e| format!("{e}"))?;
    if !registries.items().contains(&item) {
        eprintln!("note: \"{item}\" is not in the sample universe");
    }

    let mut stack = ItemStack::of(item);
    for (key, value) in pairs {
        stack = match key.as_str() {
            "item" => stack,
            "count" => stack.with_count(parse_int(key, value)?),
            "damage" => stack.with_damage(parse_int(key, value)?),
            "potion" => stack.with_potion(value.parse().map_err(|e| format!("{e}"))?),
            "nbt" => stack.with_nbt(
                serde_json::from_str(value).map_err(|e| format!("invalid nbt JSON: {e}"))?,
            ),
            "ench" => apply_enchantments(stack, value, false)?,
            "stored" => apply_enchantments(stack, value, true)?,
            other => return Err(format!("unknown stack key \"{other}\"")),
        };
    }

    Ok(stack)
}

/// Parse `id:level[,id:level...]` onto the applied or stored map.
fn apply_enchantments(
    mut stack: ItemStack,
    list: &str,
    stored: bool,
) -> Result<ItemStack, String> {
    for entry in list.split(',') {
        let (id, level) = entry
            .split_once(':')
            .map_or((entry, "1"), |(id, level)| (id, level));
        let id: Ident = id.parse().map_err(|e| format!("{e}"))?;
        let level: i32 = level
            .parse()
            .map_err(|_| format!("invalid enchantment level \"{level}\""))?;
        stack = if stored {
            stack.with_stored(id, level)
        } else {
            stack.enchanted(id, level)
        };
    }
    Ok(stack)
}

fn parse_int(key: &str, value: &str) -> Result<i32, String> {
    value
        .parse()
        .map_err(|_| format!("invalid integer for \"{key}\": \"{value}\""))
}

fn print_usage() {
    eprintln!(
        "Usage: crit <command> [options]

Commands:
  check <rule>                          Validate a rule file
  eval <rule> --stack key=value...      Evaluate a rule against a stack
                                        (keys: item, count, damage, potion,
                                         nbt, ench, stored)
  gen <out-dir>                         Write the built-in tag files
  info                                  Print registered content ids
  help                                  Show this help"
    );
}

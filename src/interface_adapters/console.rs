// Line-based sandbox console: parses operator commands into host actions.

use glam::Vec3;
use thiserror::Error;

use crate::domain::state::{PlayerId, Team};

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Spawn {
        id: PlayerId,
        team: Team,
        position: Vec3,
    },
    Kill {
        id: PlayerId,
    },
    Disconnect {
        id: PlayerId,
    },
    Move {
        id: PlayerId,
        position: Vec3,
    },
    RoundStart,
    Detonate {
        thrower: PlayerId,
        origin: Vec3,
    },
    Hurt {
        victim: PlayerId,
        attacker: Option<PlayerId>,
        weapon: String,
        health: i32,
        armor: i32,
    },
    Damage {
        victim: PlayerId,
        attacker: Option<PlayerId>,
        weapon_class: String,
        amount: f32,
    },
    Reload,
    Status,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConsoleError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("invalid {field}: `{value}`")]
    Invalid { field: &'static str, value: String },
}

pub fn parse_command(line: &str) -> Result<ConsoleCommand, ConsoleError> {
    let mut parts = line.split_whitespace();
    let command = parts.next().ok_or(ConsoleError::Empty)?;
    let args: Vec<&str> = parts.collect();

    match command {
        "spawn" => {
            let [id, team, x, y, z] = args[..] else {
                return Err(ConsoleError::Usage("spawn <id> <t|ct|spec> <x> <y> <z>"));
            };
            Ok(ConsoleCommand::Spawn {
                id: parse_id(id)?,
                team: parse_team(team)?,
                position: parse_vec(x, y, z)?,
            })
        }
        "kill" => {
            let [id] = args[..] else {
                return Err(ConsoleError::Usage("kill <id>"));
            };
            Ok(ConsoleCommand::Kill { id: parse_id(id)? })
        }
        "disconnect" => {
            let [id] = args[..] else {
                return Err(ConsoleError::Usage("disconnect <id>"));
            };
            Ok(ConsoleCommand::Disconnect { id: parse_id(id)? })
        }
        "move" => {
            let [id, x, y, z] = args[..] else {
                return Err(ConsoleError::Usage("move <id> <x> <y> <z>"));
            };
            Ok(ConsoleCommand::Move {
                id: parse_id(id)?,
                position: parse_vec(x, y, z)?,
            })
        }
        "round" => Ok(ConsoleCommand::RoundStart),
        "detonate" => {
            let [thrower, x, y, z] = args[..] else {
                return Err(ConsoleError::Usage("detonate <thrower> <x> <y> <z>"));
            };
            Ok(ConsoleCommand::Detonate {
                thrower: parse_id(thrower)?,
                origin: parse_vec(x, y, z)?,
            })
        }
        "hurt" => {
            let (victim, attacker, weapon, health, armor) = match args[..] {
                [v, a, w, h] => (v, a, w, h, "0"),
                [v, a, w, h, ar] => (v, a, w, h, ar),
                _ => {
                    return Err(ConsoleError::Usage(
                        "hurt <victim> <attacker|-> <weapon> <health> [armor]",
                    ));
                }
            };
            Ok(ConsoleCommand::Hurt {
                victim: parse_id(victim)?,
                attacker: parse_optional_id(attacker)?,
                weapon: weapon.to_string(),
                health: parse_count("health", health)?,
                armor: parse_count("armor", armor)?,
            })
        }
        "damage" => {
            let [victim, attacker, weapon_class, amount] = args[..] else {
                return Err(ConsoleError::Usage(
                    "damage <victim> <attacker|-> <weapon_class> <amount>",
                ));
            };
            Ok(ConsoleCommand::Damage {
                victim: parse_id(victim)?,
                attacker: parse_optional_id(attacker)?,
                weapon_class: weapon_class.to_string(),
                amount: parse_amount(amount)?,
            })
        }
        "reload" => Ok(ConsoleCommand::Reload),
        "status" => Ok(ConsoleCommand::Status),
        "quit" | "exit" => Ok(ConsoleCommand::Quit),
        other => Err(ConsoleError::Unknown(other.to_string())),
    }
}

fn parse_num<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, ConsoleError> {
    value.parse().map_err(|_| ConsoleError::Invalid {
        field,
        value: value.to_string(),
    })
}

// Damage figures are never negative.
fn parse_count(field: &'static str, value: &str) -> Result<i32, ConsoleError> {
    let n: i32 = parse_num(field, value)?;
    if n < 0 {
        return Err(ConsoleError::Invalid {
            field,
            value: value.to_string(),
        });
    }
    Ok(n)
}

fn parse_amount(value: &str) -> Result<f32, ConsoleError> {
    let amount: f32 = parse_num("amount", value)?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(ConsoleError::Invalid {
            field: "amount",
            value: value.to_string(),
        });
    }
    Ok(amount)
}

fn parse_id(value: &str) -> Result<PlayerId, ConsoleError> {
    parse_num("player id", value)
}

fn parse_optional_id(value: &str) -> Result<Option<PlayerId>, ConsoleError> {
    if value == "-" {
        return Ok(None);
    }
    parse_id(value).map(Some)
}

fn parse_team(value: &str) -> Result<Team, ConsoleError> {
    match value.to_ascii_lowercase().as_str() {
        "t" => Ok(Team::Terrorist),
        "ct" => Ok(Team::CounterTerrorist),
        "spec" => Ok(Team::Spectator),
        _ => Err(ConsoleError::Invalid {
            field: "team",
            value: value.to_string(),
        }),
    }
}

fn parse_vec(x: &str, y: &str, z: &str) -> Result<Vec3, ConsoleError> {
    let v = Vec3::new(
        parse_num("x", x)?,
        parse_num("y", y)?,
        parse_num("z", z)?,
    );
    if !v.is_finite() {
        return Err(ConsoleError::Invalid {
            field: "position",
            value: format!("{x} {y} {z}"),
        });
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_spawn() {
        assert_eq!(
            parse_command("spawn 3 ct 10 -20 0.5"),
            Ok(ConsoleCommand::Spawn {
                id: 3,
                team: Team::CounterTerrorist,
                position: Vec3::new(10.0, -20.0, 0.5),
            })
        );
    }

    #[test]
    fn parses_hurt_with_default_armor_and_no_attacker() {
        assert_eq!(
            parse_command("hurt 1 - worldspawn 25"),
            Ok(ConsoleCommand::Hurt {
                victim: 1,
                attacker: None,
                weapon: "worldspawn".to_string(),
                health: 25,
                armor: 0,
            })
        );
    }

    #[test]
    fn rejects_wrong_arity_with_usage() {
        assert!(matches!(
            parse_command("detonate 1 0 0"),
            Err(ConsoleError::Usage(_))
        ));
    }

    #[test]
    fn rejects_bad_numbers_and_unknown_commands() {
        assert_eq!(
            parse_command("kill abc"),
            Err(ConsoleError::Invalid {
                field: "player id",
                value: "abc".to_string(),
            })
        );
        assert_eq!(
            parse_command("fly 1"),
            Err(ConsoleError::Unknown("fly".to_string()))
        );
        assert_eq!(parse_command("   "), Err(ConsoleError::Empty));
    }

    #[test]
    fn rejects_non_finite_positions() {
        assert!(matches!(
            parse_command("move 1 inf 0 0"),
            Err(ConsoleError::Invalid { field: "position", .. })
        ));
    }

    #[test]
    fn rejects_negative_or_non_finite_damage() {
        for line in [
            "damage 1 - weapon_ak47 -inf",
            "damage 1 - weapon_ak47 NaN",
            "damage 1 - weapon_ak47 -5",
        ] {
            assert!(matches!(
                parse_command(line),
                Err(ConsoleError::Invalid { field: "amount", .. })
            ));
        }
        assert!(matches!(
            parse_command("hurt 1 - hegrenade -2147483648"),
            Err(ConsoleError::Invalid { field: "health", .. })
        ));
        assert!(matches!(
            parse_command("hurt 1 - hegrenade 10 -1"),
            Err(ConsoleError::Invalid { field: "armor", .. })
        ));
    }
}

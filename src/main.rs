use std::time::Duration;

use mentorbee::config::{LoggingSettings, Settings};
use mentorbee::core::{DiscoverySession, MatchPolicy, Point, RandomDecider, SessionConfig, SwipeEvent};
use mentorbee::models::ReviewRequest;
use mentorbee::services::{
    categories, CandidateSupply, CannedReplies, ChatService, ChatStore, MockCandidateSupply,
    ReviewLedger,
};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// One line of driver input
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Categories,
    Category(Option<String>),
    Down(Point),
    Move(Point),
    Up,
    Like,
    Pass,
    Ack,
    Chats,
    Say { chat_id: String, text: String },
    End(String),
    Review { partner_id: String, rating: u8, comment: String },
    Skip(String),
    Quit,
}

fn parse_point(args: &[&str]) -> Option<Point> {
    match args {
        [x, y] => Some(Point::new(x.parse().ok()?, y.parse().ok()?)),
        _ => None,
    }
}

fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let verb = words.next()?;
    let args: Vec<&str> = words.collect();

    let command = match verb {
        "categories" => Command::Categories,
        "category" => Command::Category(args.first().map(|s| s.to_string())),
        "down" => Command::Down(parse_point(&args)?),
        "move" => Command::Move(parse_point(&args)?),
        "up" => Command::Up,
        "like" => Command::Like,
        "pass" => Command::Pass,
        "ack" => Command::Ack,
        "chats" => Command::Chats,
        "say" => {
            let (chat_id, rest) = args.split_first()?;
            if rest.is_empty() {
                return None;
            }
            Command::Say {
                chat_id: chat_id.to_string(),
                text: rest.join(" "),
            }
        }
        "end" => Command::End(args.first()?.to_string()),
        "review" => match args.as_slice() {
            [partner_id, rating, comment @ ..] => Command::Review {
                partner_id: partner_id.to_string(),
                rating: rating.parse().ok()?,
                comment: comment.join(" "),
            },
            _ => return None,
        },
        "skip" => Command::Skip(args.first()?.to_string()),
        "quit" | "exit" => Command::Quit,
        _ => return None,
    };
    Some(command)
}

fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the view snapshots
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if logging.format == "json" {
        subscriber.json().init();
    } else {
        subscriber.pretty().init();
    }
}

fn emit(event: Option<&SwipeEvent>, session: &DiscoverySession) {
    let out = json!({
        "event": event,
        "view": session.view(),
    });
    println!("{}", out);
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load .env file if present
    dotenv::dotenv().ok();

    // MENTORBEE_CONFIG points at a single settings file instead of config/
    let loaded = match std::env::var("MENTORBEE_CONFIG") {
        Ok(path) => Settings::load_from(path),
        Err(_) => Settings::load(),
    };
    let logging = loaded
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();
    init_tracing(&logging);

    let settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting MentorBee discovery driver...");

    let supply = match MockCandidateSupply::seeded(Duration::from_millis(settings.supply.fetch_delay_ms)) {
        Ok(supply) => supply,
        Err(e) => {
            error!("Failed to load seed profiles: {}", e);
            std::process::exit(1);
        }
    };

    let chat_store = ChatStore::seeded().unwrap_or_else(|e| {
        warn!("Sample conversations unavailable ({}), starting empty", e);
        ChatStore::new()
    });
    let replies = match settings.discovery.match_seed {
        Some(seed) => CannedReplies::seeded(seed),
        None => CannedReplies::from_entropy(),
    };
    let chat = ChatService::new(
        chat_store,
        replies,
        Duration::from_millis(settings.chat.reply_delay_ms),
    );

    let discovery = &settings.discovery;
    let decider = match discovery.match_seed {
        Some(seed) => RandomDecider::seeded(seed, discovery.match_probability),
        None => RandomDecider::from_entropy(discovery.match_probability),
    };
    let mut session = DiscoverySession::new(SessionConfig::from(discovery), MatchPolicy::new(decider));
    let mut reviews = ReviewLedger::new();

    info!(
        "Session ready (threshold: {}px, settle: {}ms, match probability: {})",
        discovery.swipe_threshold_px, discovery.settle_delay_ms, discovery.match_probability
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let Some(command) = parse_command(&line) else {
            warn!("Unrecognised command: {}", line.trim());
            continue;
        };

        let event = match command {
            Command::Quit => break,
            Command::Categories => {
                println!("{}", json!(categories()));
                continue;
            }
            Command::Chats => {
                let store = chat.store().lock().await;
                println!("{}", json!(store.active()));
                continue;
            }
            Command::Say { chat_id, text } => {
                match chat.send_message(&chat_id, &text).await {
                    Ok((message, _reply)) => println!("{}", json!(message)),
                    Err(e) => warn!("Message not sent: {}", e),
                }
                continue;
            }
            Command::End(chat_id) => {
                let ended = chat.store().lock().await.end_mentorship(&chat_id);
                match ended {
                    Ok(partner_id) => println!("{}", json!({ "review": partner_id })),
                    Err(e) => warn!("Could not end mentorship: {}", e),
                }
                continue;
            }
            Command::Review { partner_id, rating, comment } => {
                let req = ReviewRequest { partner_id, rating, comment };
                match reviews.submit_review(req) {
                    Ok(review) => println!("{}", json!(review)),
                    Err(e) => warn!("Review not submitted: {}", e),
                }
                continue;
            }
            Command::Skip(partner_id) => {
                reviews.skip_review(&partner_id);
                continue;
            }
            Command::Category(category) => {
                match supply.fetch(category.as_deref()).await {
                    Ok(candidates) => {
                        let id = category.unwrap_or_else(|| mentorbee::models::FOR_YOU.to_string());
                        session.load(id, candidates);
                    }
                    Err(e) => warn!("Could not load candidates: {}", e),
                }
                None
            }
            Command::Down(point) => Some(session.pointer_down(point)),
            Command::Move(point) => Some(session.pointer_move(point)),
            Command::Up => Some(session.pointer_up()),
            Command::Like => Some(session.press_like()),
            Command::Pass => Some(session.press_pass()),
            Command::Ack => Some(session.acknowledge_match()),
        };

        emit(event.as_ref(), &session);

        // Swipe-out animation runs to completion before the next input
        // Swipe-out animation runs to completion before the next input
        if matches!(event, Some(SwipeEvent::Animating { .. })) {
            let settled = chat.settle_swipe(&mut session).await;
            emit(Some(&settled), &session);
        }
    }

    info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pointer_commands() {
        assert_eq!(parse_command("down 10 20"), Some(Command::Down(Point::new(10.0, 20.0))));
        assert_eq!(parse_command("move -5.5 0"), Some(Command::Move(Point::new(-5.5, 0.0))));
        assert_eq!(parse_command("up"), Some(Command::Up));
        assert_eq!(parse_command("down 10"), None);
        assert_eq!(parse_command("move a b"), None);
    }

    #[test]
    fn test_parse_say_keeps_text() {
        assert_eq!(
            parse_command("say c1 see you on friday"),
            Some(Command::Say {
                chat_id: "c1".to_string(),
                text: "see you on friday".to_string(),
            })
        );
        assert_eq!(parse_command("say c1"), None);
    }

    #[test]
    fn test_parse_review() {
        assert_eq!(
            parse_command("review p1 5 thanks a lot"),
            Some(Command::Review {
                partner_id: "p1".to_string(),
                rating: 5,
                comment: "thanks a lot".to_string(),
            })
        );
        assert_eq!(
            parse_command("review p1 0"),
            Some(Command::Review {
                partner_id: "p1".to_string(),
                rating: 0,
                comment: String::new(),
            })
        );
        assert_eq!(parse_command("review p1 five"), None);
        assert_eq!(parse_command("review p1"), None);
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(parse_command("category"), Some(Command::Category(None)));
        assert_eq!(
            parse_command("category finance"),
            Some(Command::Category(Some("finance".to_string())))
        );
        assert_eq!(parse_command("exit"), Some(Command::Quit));
        assert_eq!(parse_command("end c1"), Some(Command::End("c1".to_string())));
        assert_eq!(parse_command("skip p1"), Some(Command::Skip("p1".to_string())));
        assert_eq!(parse_command("dance"), None);
    }
}

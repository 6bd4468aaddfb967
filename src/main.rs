use imagine::{logger, Config, GenerationResult, ImagineClient, ModelId, Sender};
use std::env;
use std::time::Duration;

struct Args {
    prompt: String,
    model: ModelId,
    chat: Option<String>,
}

fn parse_args() -> Result<Args, Box<dyn std::error::Error>> {
    let mut words = Vec::new();
    let mut model = ModelId::default();
    let mut chat = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--model" | "-m" => {
                let name = args.next().ok_or("--model needs a value")?;
                model = name.parse()?;
            }
            "--chat" | "-c" => {
                chat = Some(args.next().ok_or("--chat needs a message")?);
            }
            _ => words.push(arg),
        }
    }

    Ok(Args {
        prompt: words.join(" "),
        model,
        chat,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    let level = env::var("IMAGINE_LOG")
        .ok()
        .and_then(|name| logger::LogLevel::parse(&name))
        .unwrap_or(logger::LogLevel::Info);
    logger::init_with_config(logger::LoggerConfig::development().with_level(level))?;

    let args = parse_args()?;
    let config = Config::from_env();
    logger::log_client_info(&config);

    let client = ImagineClient::new(config)?;
    client.load().await;

    log::info!("📚 Available models:");
    for (id, label, synchronous) in ModelId::supported_models() {
        log::info!(
            "  {} - {}{}",
            id,
            label,
            if synchronous { " (no progress)" } else { "" }
        );
    }

    if !args.prompt.is_empty() || args.chat.is_none() {
        client.set_prompt(args.prompt.clone());
        client.select_model(args.model);
        if let Some(wait) = args.model.estimated_duration() {
            log::info!("⏳ Loading... (estimated {} seconds)", wait.as_secs());
        }

        let generation = client.generation().clone();
        let run = tokio::spawn(async move { generation.generate().await });
        tokio::pin!(run);

        let mut ticker = tokio::time::interval(Duration::from_millis(500));
        let mut last_progress = None;
        let outcome = loop {
            tokio::select! {
                outcome = &mut run => break outcome?,
                _ = tokio::signal::ctrl_c() => {
                    let notice = client.generation().cancel();
                    log::warn!("Cancelled by user");
                    let _ = notice.await;
                    return Ok(());
                }
                _ = ticker.tick() => {
                    let (progress, eta, polling) =
                        client.store().read(|s| (s.progress, s.eta, s.polling));
                    if polling && last_progress != Some(progress) {
                        println!("{:>3}%  ETA: {} sec", progress, eta);
                        last_progress = Some(progress);
                    }
                }
            }
        };

        match outcome {
            Ok(GenerationResult::Image { .. }) => {
                if let Some(url) = client.generation().display_image_url() {
                    println!("Image: {}", url);
                }
            }
            Ok(GenerationResult::Failed { reason }) => {
                log::error!("Image generation failed or could not be loaded: {}", reason);
            }
            Err(e) if e.is_validation() => {
                let alert = client.store().read(|s| s.alert.clone());
                eprintln!("{}", alert.unwrap_or_else(|| e.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        let gallery = client.gallery().resolved_images();
        if gallery.is_empty() {
            println!("No images available.");
        } else {
            println!("Gallery ({} images):", gallery.len());
            for url in gallery {
                println!("  {}", url);
            }
        }
    }

    if let Some(message) = args.chat {
        client.chat().send(&message).await;
        for entry in client.chat().transcript() {
            let who = match entry.sender {
                Sender::User => "you",
                Sender::Ai => "ai",
            };
            println!("[{}] {}", who, entry.text);
        }
    }

    Ok(())
}

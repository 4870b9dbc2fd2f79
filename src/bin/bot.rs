use anyhow::Result;
use chrono::{DateTime, Utc};
use dotenvy::dotenv;
use log::{debug, error, info, warn};
use serenity::async_trait;
use serenity::model::application::interaction::Interaction;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::sync::Arc;
use tokio::sync::RwLock;

use akasha::commands::handlers::create_all_commands;
use akasha::commands::CommandRegistry;
use akasha::components::handlers::create_all_components;
use akasha::components::ComponentRegistry;
use akasha::core::Config;
use akasha::gateway::{presence, split_interaction, SerenityPlatform, SerenityResponder};
use akasha::interaction::InteractionContext;
use akasha::session::{self, InboundMessage, MessageAction, Session};
use akasha::{Dispatch, InteractionRouter};

struct Handler {
    router: Arc<InteractionRouter>,
    config: Arc<Config>,
    session: RwLock<Option<Arc<Session>>>,
    started_at: DateTime<Utc>,
}

impl Handler {
    fn new(router: InteractionRouter, config: Config) -> Self {
        Handler {
            router: Arc::new(router),
            config: Arc::new(config),
            session: RwLock::new(None),
            started_at: Utc::now(),
        }
    }

    async fn session(&self) -> Option<Arc<Session>> {
        self.session.read().await.clone()
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        let (activity, status) = presence();
        ctx.set_presence(Some(activity), status).await;

        let platform = SerenityPlatform::new(ctx.http.clone());
        let session = session::on_ready(
            &platform,
            self.router.commands(),
            self.config.clone(),
            ready.user.id.0,
            self.started_at,
        )
        .await;

        // A reconnect replaces the session with a fresh one
        *self.session.write().await = Some(Arc::new(session));
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let (data, handle) = split_interaction(interaction);

        let Some(handle) = handle else {
            debug!("Ignoring {} from user {}", data.kind.label(), data.user_id);
            return;
        };
        let Some(session) = self.session().await else {
            warn!("Dropping {} received before ready", data.kind.label());
            return;
        };

        let kind = data.kind.label();
        let responder = Arc::new(SerenityResponder::new(ctx.http.clone(), handle));
        let interaction_ctx = InteractionContext::new(data, session, responder);

        match self.router.dispatch(&interaction_ctx).await {
            Ok(Dispatch::Responded) | Ok(Dispatch::Silent) => {
                debug!("[{}] Handled {kind}", interaction_ctx.trace_id);
            }
            Ok(Dispatch::Ignored(miss)) => {
                debug!("[{}] Unrouted {kind}: {miss:?}", interaction_ctx.trace_id);
            }
            Err(e) => {
                error!("[{}] Error handling {kind}: {e:#}", interaction_ctx.trace_id);
            }
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let Some(session) = self.session().await else {
            return;
        };

        let platform = SerenityPlatform::new(ctx.http.clone());
        match session::on_message(&platform, &session, InboundMessage::from(&msg)).await {
            Ok(MessageAction::Deleted) | Ok(MessageAction::Ignored) => {}
            Err(e) => error!("Failed to clear terminal message {}: {e}", msg.id),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    // Runs for every panic, including handler panics the router later contains
    std::panic::set_hook(Box::new(|panic_info| {
        error!("panic: {panic_info}");
    }));

    info!("Starting The Akasha System...");

    let commands = CommandRegistry::load(create_all_commands())?;
    let components = ComponentRegistry::load(create_all_components())?;
    info!(
        "📦 Loaded {} commands and {} components",
        commands.len(),
        components.len()
    );

    let router = InteractionRouter::new(commands, components);
    let token = config.discord_token.clone();
    let handler = Handler::new(router, config);

    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES;

    let mut client = Client::builder(&token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Establishing WebSocket connection to Discord gateway...");
    info!("Gateway intents: {intents:?}");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}

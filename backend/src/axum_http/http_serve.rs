use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Result;
use application::usercases::{
    auth::AuthUseCase,
    clients::ClientUseCase,
    creators::{CreatorUseCase, TrialSettings},
    subscriptions::BillingUseCase,
};
use axum::{
    Extension, Router,
    http::{
        HeaderName, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::get,
};
use infra::{
    payments::stripe_client::StripeClient,
    postgres::{
        postgres_connection::PgPoolSquad,
        repositories::{
            clients::ClientPostgres, creators::CreatorPostgres,
            subscriptions::SubscriptionPostgres, users::UserPostgres,
        },
    },
    receita_federal::hub_dev::HubDevClient,
    security::argon2_hasher::Argon2Hasher,
    sessions::in_memory::InMemorySessionStore,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::{
    auth::{CSRF_HEADER, SharedAuthenticator},
    axum_http::{
        default_routers,
        routers::{
            self,
            access::AccessGate,
            auth::{AuthState, SessionCookie},
        },
    },
    config::config_model::DotEnvyConfig,
};

pub async fn start(
    config: Arc<DotEnvyConfig>,
    db_pool: Arc<PgPoolSquad>,
    session_store: Arc<InMemorySessionStore>,
) -> Result<()> {
    let stripe = Arc::new(StripeClient::new(
        config.stripe.secret_key.clone(),
        config.stripe.webhook_secret.clone(),
        Duration::from_secs(config.stripe.timeout),
    )?);
    let hub_dev = Arc::new(HubDevClient::new(
        config.hub_dev.api_url.clone(),
        config.hub_dev.token.clone(),
        Duration::from_secs(config.hub_dev.timeout),
    )?);
    let subscription_repository = Arc::new(SubscriptionPostgres::new(Arc::clone(&db_pool)));

    let auth_usecase = Arc::new(AuthUseCase::new(
        Arc::new(UserPostgres::new(Arc::clone(&db_pool))),
        session_store,
        Arc::new(Argon2Hasher::new()),
    ));
    let creator_usecase = Arc::new(CreatorUseCase::new(
        Arc::new(CreatorPostgres::new(Arc::clone(&db_pool))),
        Arc::clone(&subscription_repository),
        Arc::clone(&hub_dev),
        Arc::clone(&stripe),
        TrialSettings {
            price_id: config.stripe.price_id.clone(),
            trial_days: config.trial.days,
        },
    ));
    let billing_usecase = Arc::new(BillingUseCase::new(
        Arc::clone(&subscription_repository),
        Arc::clone(&stripe),
    ));
    let client_usecase = Arc::new(ClientUseCase::new(
        Arc::new(ClientPostgres::new(Arc::clone(&db_pool))),
        Arc::clone(&hub_dev),
    ));

    let authenticator: SharedAuthenticator = auth_usecase.clone();
    let auth_state = Arc::new(AuthState {
        usecase: auth_usecase,
        cookie: SessionCookie {
            secure: config.stage.secure_cookies(),
            ttl_hours: config.session.ttl_hours,
        },
    });
    let gate = Arc::new(AccessGate {
        billing: Arc::clone(&billing_usecase),
        creators: Arc::clone(&creator_usecase),
    });

    let app = Router::new()
        .fallback(default_routers::not_found)
        .nest("/auth", routers::auth::routes(auth_state))
        .nest("/creator", routers::creators::routes(creator_usecase))
        .nest("/client", routers::clients::routes(client_usecase, gate))
        .nest("/subscription", routers::subscriptions::routes(billing_usecase))
        .route("/health-check", get(default_routers::health_check))
        .layer(Extension(authenticator))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.backend_server.timeout,
        )))
        .layer(RequestBodyLimitLayer::new(
            (config.backend_server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([
                    AUTHORIZATION,
                    CONTENT_TYPE,
                    HeaderName::from_static(CSRF_HEADER),
                ])
                .allow_origin(Any), // TODO Add the domain later
        )
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.backend_server.port));
    let listener = TcpListener::bind(addr).await?;

    info!(stage = %config.stage, "Server is running on port {}", config.backend_server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = ?err, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}

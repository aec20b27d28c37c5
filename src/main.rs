use anyhow::Result;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};
use dotenvy::dotenv;

use taxi_moto_fleet::config::EnvironmentConfig;
use taxi_moto_fleet::controllers::auth_controller::AuthController;
use taxi_moto_fleet::database::DatabaseConnection;
use taxi_moto_fleet::repositories::Repositories;
use taxi_moto_fleet::{create_app_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .init();

    info!("🏍️ Taxi-Moto Fleet - API");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);

    // Inicializar almacenamiento
    let repos = match config.database_url.as_deref() {
        Some(url) => {
            let db_connection = match DatabaseConnection::connect(url).await {
                Ok(conn) => conn,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {}", e);
                    return Err(anyhow::anyhow!("Error de base de datos: {}", e));
                }
            };
            Repositories::postgres(db_connection.pool())
        }
        None => {
            warn!("⚠️ DATABASE_URL no definida, usando almacenamiento en memoria");
            Repositories::in_memory()
        }
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let app_state = AppState::new(repos, config);

    // Admin inicial
    match app_state.config.admin_credentials() {
        Some((username, password)) => {
            let created = AuthController::new(&app_state)
                .ensure_admin(username, password)
                .await
                .map_err(|e| anyhow::anyhow!("Error creando la cuenta admin: {}", e))?;
            if !created {
                info!("👑 Cuenta admin {} ya existente", username);
            }
        }
        None => warn!("⚠️ ADMIN_USERNAME/ADMIN_PASSWORD no definidas, no se crea cuenta admin"),
    }

    // Purga periódica de tokens revocados ya expirados
    let cleanup_state = app_state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(3600));
        loop {
            interval.tick().await;
            cleanup_state.cleanup_expired_tokens().await;
        }
    });
    let app = create_app_router(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints públicos:");
    info!("   GET  /health - Health check");
    info!("   POST /login, /register, /register/client - Sesión y registro");
    info!("   POST /reservation-rapide/ - Réservation rapide");
    info!("   POST /poser-question/ - Poser une question");
    info!("   GET  /faq/, /faq/:id/ - FAQ pública");
    info!("   GET  /sitemap.xml - Sitemap");
    info!("🔐 Endpoints autenticados:");
    info!("   POST /logout  GET /me");
    info!("🏍️ Flota:");
    info!("   GET/POST /motos/  GET /moto/:id/  POST /moto/:id/modifier_statut/");
    info!("   POST /supprimer-moto/:id/  POST /attribuer-moto/");
    info!("   GET/POST /conducteurs/  GET /conducteur/:id/  POST /conducteur/:id/modifier/");
    info!("   POST /conducteurs/supprimer/:id/");
    info!("📒 Libro diario:");
    info!("   POST /recettes/ajouter/  POST /recette/:id/modifier/  GET /conducteur/:id/recettes/");
    info!("   POST /absence/:driver_id/  GET /conducteur/:id/absences/");
    info!("🔧 Averías:");
    info!("   GET /pannes/  POST /pannes/ajouter/");
    info!("📅 Reservas:");
    info!("   GET/POST /reservations/, /abonnements/, /reservations-rapides/");
    info!("❓ Preguntas:");
    info!("   GET /questions/  POST /questions/:id/repondre/");
    info!("📊 Informes:");
    info!("   GET /bilan-general/, /dashboard/admin/, /dashboard/conducteur/");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}

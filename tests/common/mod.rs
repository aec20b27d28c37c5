#![allow(dead_code)]

use taxi_moto_fleet::config::EnvironmentConfig;
use taxi_moto_fleet::controllers::auth_controller::{hash_password, AuthController};
use taxi_moto_fleet::controllers::vehicle_controller::VehicleController;
use taxi_moto_fleet::dto::auth_dto::{RegisterClientRequest, RegisterDriverRequest};
use taxi_moto_fleet::dto::vehicle_dto::CreateVehicleRequest;
use taxi_moto_fleet::models::auth::Actor;
use taxi_moto_fleet::models::user::{NewAccount, UserRole};
use taxi_moto_fleet::models::vehicle::Vehicle;
use taxi_moto_fleet::utils::jwt::generate_token;
use taxi_moto_fleet::AppState;

pub const PASSWORD: &str = "motdepasse123";

pub fn test_config() -> EnvironmentConfig {
    EnvironmentConfig {
        bcrypt_cost: 4,
        ..EnvironmentConfig::default()
    }
}

pub fn test_state() -> AppState {
    AppState::in_memory(test_config())
}

pub async fn create_admin(state: &AppState) -> Actor {
    let account = state
        .repos
        .users
        .create_account(NewAccount {
            username: "admin".to_string(),
            email: Some("admin@taximoto.tg".to_string()),
            password_hash: hash_password(PASSWORD, 4).unwrap(),
            first_name: "Admin".to_string(),
            last_name: String::new(),
            phone: String::new(),
            address: None,
            role: UserRole::Admin,
        })
        .await
        .unwrap();
    Actor::Admin { user_id: account.user.id }
}

pub fn driver_form(username: &str) -> RegisterDriverRequest {
    RegisterDriverRequest {
        username: username.to_string(),
        password: PASSWORD.to_string(),
        password_confirm: PASSWORD.to_string(),
        first_name: "Kossi".to_string(),
        last_name: "Mensah".to_string(),
        email: None,
        phone: "+228 90 12 34 56".to_string(),
        address: "Lomé, Bè".to_string(),
    }
}

pub async fn create_driver(state: &AppState, username: &str) -> Actor {
    let session = AuthController::new(state)
        .register_driver(driver_form(username))
        .await
        .unwrap()
        .data
        .unwrap();
    Actor::Driver {
        user_id: session.user.id,
        driver_id: session.profile_id.unwrap(),
    }
}

pub async fn create_client(state: &AppState, username: &str) -> Actor {
    let session = AuthController::new(state)
        .register_client(RegisterClientRequest {
            username: username.to_string(),
            password: PASSWORD.to_string(),
            password_confirm: PASSWORD.to_string(),
            first_name: "Afi".to_string(),
            last_name: "Agbeko".to_string(),
            email: Some("afi@example.com".to_string()),
            phone: "+228 91 00 00 00".to_string(),
            address: None,
        })
        .await
        .unwrap()
        .data
        .unwrap();
    Actor::Client {
        user_id: session.user.id,
        client_id: session.profile_id.unwrap(),
    }
}

pub async fn create_vehicle(state: &AppState, admin: &Actor, name: &str, plate: &str) -> Vehicle {
    VehicleController::new(state)
        .create(
            admin,
            CreateVehicleRequest {
                name: name.to_string(),
                plate: plate.to_string(),
            },
        )
        .await
        .unwrap()
        .data
        .unwrap()
}

pub fn driver_id(actor: &Actor) -> uuid::Uuid {
    actor.profile_id().unwrap()
}

pub fn token_for(state: &AppState, actor: &Actor) -> String {
    generate_token(actor.user_id(), actor.role(), actor.profile_id(), &state.jwt).unwrap()
}

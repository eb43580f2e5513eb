// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, User},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self { user_repo, jwt_secret }
    }

    pub async fn register_user(&self, username: &str, password: &str) -> Result<String, AppError> {
        // 1. Hashing fora do runtime assíncrono
        let password_clone = password.to_owned();
        let hashed_password = tokio::task::spawn_blocking(move || {
            hash(&password_clone, bcrypt::DEFAULT_COST)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        // 2. Cria o usuário (violação de unicidade vira UsernameAlreadyExists)
        let new_user = self
            .user_repo
            .create_user(username, &hashed_password, "user")
            .await?;

        // 3. Já devolve um token, como no login
        self.create_jwt(&new_user)
    }

    pub async fn login_user(&self, username: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let hash_clone = user.password_hash.clone();
        let is_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação: {}", e))??;

        if !is_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_jwt(&user)
    }

    // Decodifica o token e carrega o usuário correspondente
    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)
    }

    /// Garante que a conta administrativa padrão exista (chamado no boot).
    pub async fn ensure_admin(&self) -> Result<User, AppError> {
        if let Some(admin) = self.user_repo.find_by_username("admin").await? {
            return Ok(admin);
        }

        let password =
            std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
        let hashed_password = tokio::task::spawn_blocking(move || {
            hash(&password, bcrypt::DEFAULT_COST)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let admin = self
            .user_repo
            .create_user("admin", &hashed_password, "admin")
            .await?;
        tracing::info!("👤 Administrador padrão criado: admin");
        Ok(admin)
    }

    fn create_jwt(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            iat: now.timestamp() as usize,
            exp: (now + chrono::Duration::hours(24)).timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;
        Ok(token)
    }
}

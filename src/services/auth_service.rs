use crate::{database::MongoDB, models::{UserAccount, UserInfo}};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::{doc, oid::ObjectId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // uid
    pub email: String,
    pub name: Option<String>,
    pub role: String,
    pub iat: usize, // issued at
    pub exp: usize, // expiration
    pub jti: String, // JWT ID
    pub aud: String, // audience
    pub iss: String, // issuer
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

// Request/Response structures
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub display_name: Option<String>,
    pub google_id: Option<String>,
    pub photo_url: Option<String>,
    pub provider: Option<String>, // "local" or "google"
}

#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub refresh_token: Option<String>,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct GoogleAuthUrlResponse {
    pub success: bool,
    pub auth_url: String,
    pub state: String,
}

fn get_jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "default-secret-change-me".to_string())
}

fn get_jwt_issuer() -> String {
    std::env::var("JWT_ISSUER").unwrap_or_else(|_| "babhijra-service".to_string())
}

fn get_jwt_audience() -> String {
    std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "babhijra-api".to_string())
}

// Generate JWT token
pub fn generate_jwt(user: &UserAccount) -> Result<String, String> {
    let iat = Utc::now().timestamp() as usize;
    let exp = (Utc::now() + Duration::hours(24)).timestamp() as usize;
    let jti = Uuid::new_v4().to_string();

    let claims = Claims {
        sub: user.uid.clone(),
        email: user.email.clone(),
        name: Some(user.display_name.clone()),
        role: user.role.clone(),
        iat,
        exp,
        jti,
        aud: get_jwt_audience(),
        iss: get_jwt_issuer(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(get_jwt_secret().as_ref()),
    )
    .map_err(|e| format!("Failed to generate token: {}", e))
}

// Generate refresh token (longer expiry)
pub fn generate_refresh_token(uid: &str) -> Result<String, String> {
    let iat = Utc::now().timestamp() as usize;
    let exp = (Utc::now() + Duration::days(30)).timestamp() as usize;
    let jti = Uuid::new_v4().to_string();

    let claims = Claims {
        sub: uid.to_string(),
        email: String::new(),
        name: None,
        role: "user".to_string(),
        iat,
        exp,
        jti,
        aud: get_jwt_audience(),
        iss: get_jwt_issuer(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(get_jwt_secret().as_ref()),
    )
    .map_err(|e| format!("Failed to generate refresh token: {}", e))
}

// Verify JWT token
pub fn verify_token(token: &str) -> Result<Claims, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[get_jwt_audience()]);

    let mut issuers = HashSet::new();
    issuers.insert(get_jwt_issuer());
    validation.iss = Some(issuers);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(get_jwt_secret().as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Invalid token: {}", e))
}

// User login
pub async fn login(db: &MongoDB, request: &LoginRequest) -> Result<AuthResponse, String> {
    let collection = db.collection::<UserAccount>("users");

    let user = collection
        .find_one(doc! { "email": &request.email })
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or_else(|| "Invalid credentials".to_string())?;

    // OAuth-only accounts have no password to verify
    let stored_hash = user
        .password_hash
        .as_ref()
        .ok_or_else(|| "This account uses Google login. Please sign in with Google.".to_string())?;

    let valid = verify(&request.password, stored_hash)
        .map_err(|e| format!("Password verification error: {}", e))?;

    if !valid {
        return Err("Invalid credentials".to_string());
    }

    let now = Utc::now().timestamp_millis();
    let _ = collection
        .update_one(
            doc! { "uid": &user.uid },
            doc! { "$set": { "last_login": now } },
        )
        .await;

    if let Err(e) = crate::services::admin_service::log_activity(db, &user.uid, "login", None).await
    {
        log::warn!("⚠️  Failed to log login activity: {}", e);
    }

    let token = generate_jwt(&user)?;
    let refresh_token = generate_refresh_token(&user.uid)?;

    Ok(AuthResponse {
        success: true,
        token,
        refresh_token: Some(refresh_token),
        user: user.into(),
    })
}

// User registration
pub async fn register(db: &MongoDB, request: &RegisterRequest) -> Result<AuthResponse, String> {
    let collection = db.collection::<UserAccount>("users");

    let email = request
        .email
        .as_ref()
        .ok_or_else(|| "Email is required".to_string())?;

    let provider = request.provider.as_deref().unwrap_or("local");

    match provider {
        "local" => {
            if request.password.is_none() {
                return Err("Password is required for local registration".to_string());
            }
        }
        "google" => {
            if request.google_id.is_none() {
                return Err("Google ID is required for Google registration".to_string());
            }
        }
        _ => return Err(format!("Invalid provider: {}. Supported: local, google", provider)),
    }

    // Check if user already exists (por email ou OAuth ID)
    let mut filter = doc! { "email": email };
    if let Some(google_id) = &request.google_id {
        filter = doc! {
            "$or": [
                { "email": email },
                { "google_id": google_id }
            ]
        };
    }

    if collection
        .find_one(filter)
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .is_some()
    {
        return Err("User already exists".to_string());
    }

    let password_hash = if let Some(pwd) = &request.password {
        Some(hash(pwd, DEFAULT_COST).map_err(|e| format!("Failed to hash password: {}", e))?)
    } else {
        None
    };

    let uid = ObjectId::new().to_hex();
    let now = Utc::now().timestamp_millis();

    let new_user = UserAccount {
        _id: None,
        uid: uid.clone(),
        email: email.clone(),
        display_name: request.display_name.clone().unwrap_or_default(),
        photo_url: request.photo_url.clone(),
        password_hash,
        google_id: request.google_id.clone(),
        provider: Some(provider.to_string()),
        role: "user".to_string(),
        created_at: now,
        updated_at: now,
        last_login: Some(now),
    };

    collection
        .insert_one(&new_user)
        .await
        .map_err(|e| format!("Failed to create user: {}", e))?;

    let token = generate_jwt(&new_user)?;
    let refresh_token = generate_refresh_token(&uid)?;

    if let Err(e) =
        crate::services::admin_service::log_activity(db, &uid, "register", Some(provider)).await
    {
        log::warn!("⚠️  Failed to log registration activity: {}", e);
    }

    log::info!("✅ User registered successfully: {} (provider: {})", email, provider);

    Ok(AuthResponse {
        success: true,
        token,
        refresh_token: Some(refresh_token),
        user: new_user.into(),
    })
}

// Refresh token
pub async fn refresh_token(
    db: &MongoDB,
    request: &RefreshTokenRequest,
) -> Result<AuthResponse, String> {
    let claims = verify_token(&request.refresh_token)?;

    let collection = db.collection::<UserAccount>("users");

    let user = collection
        .find_one(doc! { "uid": &claims.sub })
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or_else(|| "User not found".to_string())?;

    let token = generate_jwt(&user)?;
    let new_refresh_token = generate_refresh_token(&user.uid)?;

    Ok(AuthResponse {
        success: true,
        token,
        refresh_token: Some(new_refresh_token),
        user: user.into(),
    })
}

// Get current user
pub async fn get_current_user(db: &MongoDB, uid: &str) -> Result<UserInfo, String> {
    let collection = db.collection::<UserAccount>("users");

    let user = collection
        .find_one(doc! { "uid": uid })
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or_else(|| "User not found".to_string())?;

    Ok(user.into())
}

// Generate Google OAuth URL
pub fn generate_google_oauth_url() -> Result<GoogleAuthUrlResponse, String> {
    let client_id = std::env::var("GOOGLE_CLIENT_ID")
        .map_err(|_| "GOOGLE_CLIENT_ID not configured".to_string())?;

    let redirect_uri = std::env::var("GOOGLE_REDIRECT_URI")
        .unwrap_or_else(|_| "http://localhost:3000/app/auth/callback".to_string());

    // Generate state for CSRF protection
    let state = Uuid::new_v4().to_string();

    let params = vec![
        ("client_id", client_id.as_str()),
        ("redirect_uri", redirect_uri.as_str()),
        ("response_type", "code"),
        ("scope", "openid email profile"),
        ("state", state.as_str()),
        ("access_type", "offline"),
        ("prompt", "select_account"),
    ];

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let auth_url = format!("https://accounts.google.com/o/oauth2/v2/auth?{}", query_string);

    Ok(GoogleAuthUrlResponse {
        success: true,
        auth_url,
        state,
    })
}

// Handle Google OAuth callback
pub async fn handle_google_callback(db: &MongoDB, code: &str) -> Result<AuthResponse, String> {
    let client_id = std::env::var("GOOGLE_CLIENT_ID")
        .map_err(|_| "GOOGLE_CLIENT_ID not configured".to_string())?;
    let client_secret = std::env::var("GOOGLE_CLIENT_SECRET")
        .map_err(|_| "GOOGLE_CLIENT_SECRET not configured".to_string())?;
    let redirect_uri = std::env::var("GOOGLE_REDIRECT_URI")
        .unwrap_or_else(|_| "http://localhost:3000/app/auth/callback".to_string());

    // Exchange code for tokens
    let client = reqwest::Client::new();
    let token_response = client
        .post("https://oauth2.googleapis.com/token")
        .form(&[
            ("code", code),
            ("client_id", &client_id),
            ("client_secret", &client_secret),
            ("redirect_uri", &redirect_uri),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await
        .map_err(|e| format!("Failed to exchange code: {}", e))?;

    if !token_response.status().is_success() {
        return Err("Failed to exchange authorization code".to_string());
    }

    let tokens: serde_json::Value = token_response
        .json()
        .await
        .map_err(|e| format!("Failed to parse token response: {}", e))?;

    let access_token = tokens["access_token"]
        .as_str()
        .ok_or_else(|| "No access token in response".to_string())?;

    // Get user info
    let user_info_response = client
        .get("https://www.googleapis.com/oauth2/v2/userinfo")
        .header("Authorization", format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| format!("Failed to get user info: {}", e))?;

    let user_info: serde_json::Value = user_info_response
        .json()
        .await
        .map_err(|e| format!("Failed to parse user info: {}", e))?;

    let email = user_info["email"]
        .as_str()
        .ok_or_else(|| "No email in user info".to_string())?;
    let name = user_info["name"].as_str().unwrap_or_default().to_string();
    let picture = user_info["picture"].as_str().map(String::from);
    let google_id = user_info["id"]
        .as_str()
        .ok_or_else(|| "No google_id in user info".to_string())?;

    let collection = db.collection::<UserAccount>("users");
    let now = Utc::now().timestamp_millis();

    // First try to find by google_id
    let user = if let Some(existing) = collection
        .find_one(doc! { "google_id": google_id })
        .await
        .map_err(|e| format!("Database error: {}", e))?
    {
        log::info!("✅ Found existing user by google_id: {}", existing.uid);

        collection
            .update_one(
                doc! { "uid": &existing.uid },
                doc! { "$set": {
                    "display_name": &name,
                    "photo_url": picture.as_deref().unwrap_or_default(),
                    "last_login": now,
                    "updated_at": now,
                }},
            )
            .await
            .map_err(|e| format!("Failed to update user: {}", e))?;

        UserAccount {
            display_name: name,
            photo_url: picture,
            last_login: Some(now),
            updated_at: now,
            ..existing
        }
    } else if let Some(existing) = collection
        .find_one(doc! { "email": email })
        .await
        .map_err(|e| format!("Database error: {}", e))?
    {
        // Account created locally before Google sign-in: attach the google_id
        log::info!("✅ Found existing user by email, adding google_id: {}", existing.uid);

        collection
            .update_one(
                doc! { "uid": &existing.uid },
                doc! { "$set": {
                    "google_id": google_id,
                    "provider": "google",
                    "display_name": &name,
                    "photo_url": picture.as_deref().unwrap_or_default(),
                    "last_login": now,
                    "updated_at": now,
                }},
            )
            .await
            .map_err(|e| format!("Failed to update user with google_id: {}", e))?;

        UserAccount {
            google_id: Some(google_id.to_string()),
            provider: Some("google".to_string()),
            display_name: name,
            photo_url: picture,
            last_login: Some(now),
            updated_at: now,
            ..existing
        }
    } else {
        let uid = ObjectId::new().to_hex();
        log::info!("✅ Creating new user with uid: {}", uid);

        let new_user = UserAccount {
            _id: None,
            uid,
            email: email.to_string(),
            display_name: name,
            photo_url: picture,
            password_hash: None, // OAuth users don't have passwords
            google_id: Some(google_id.to_string()),
            provider: Some("google".to_string()),
            role: "user".to_string(),
            created_at: now,
            updated_at: now,
            last_login: Some(now),
        };

        collection
            .insert_one(&new_user)
            .await
            .map_err(|e| format!("Failed to create user: {}", e))?;

        new_user
    };

    let token = generate_jwt(&user)?;
    let refresh_token = generate_refresh_token(&user.uid)?;

    Ok(AuthResponse {
        success: true,
        token,
        refresh_token: Some(refresh_token),
        user: user.into(),
    })
}

/// 🗑️ Delete user account and all associated data
pub async fn delete_user_account(db: &MongoDB, uid: &str) -> Result<(), String> {
    log::info!("🗑️ Deleting account for uid: {}", uid);

    // 1. Delete user from users collection
    let users = db.collection::<UserAccount>("users");
    let delete_user_result = users
        .delete_one(doc! { "uid": uid })
        .await
        .map_err(|e| format!("Failed to delete user: {}", e))?;

    if delete_user_result.deleted_count == 0 {
        log::warn!("⚠️ User {} not found in database", uid);
        return Err(format!("User {} not found", uid));
    }

    log::info!("✅ User {} deleted from users collection", uid);

    // 2. Delete the dating profile
    let profiles = db
        .database()
        .collection::<mongodb::bson::Document>("profiles");
    let deleted_profiles = profiles
        .delete_one(doc! { "uid": uid })
        .await
        .map_err(|e| format!("Failed to delete profile: {}", e))?;

    log::info!("✅ Deleted {} profile(s) for user {}", deleted_profiles.deleted_count, uid);

    // 3. Delete likes in both directions
    let likes = db.database().collection::<mongodb::bson::Document>("likes");
    let deleted_likes = likes
        .delete_many(doc! { "$or": [ { "user_id": uid }, { "profile_id": uid } ] })
        .await
        .map_err(|e| format!("Failed to delete likes: {}", e))?;

    log::info!("✅ Deleted {} like(s) for user {}", deleted_likes.deleted_count, uid);

    // 4. Delete activity log entries
    let activity = db
        .database()
        .collection::<mongodb::bson::Document>("user_activity");
    let deleted_activity = activity
        .delete_many(doc! { "uid": uid })
        .await
        .map_err(|e| format!("Failed to delete activity log: {}", e))?;

    log::info!("✅ Deleted {} activity record(s) for user {}", deleted_activity.deleted_count, uid);

    // Conversations are kept so the other participant's inbox stays intact;
    // the missing profile makes them drop out of that user's listing.

    log::info!("🎉 Account and all data successfully deleted for user {}", uid);
    Ok(())
}

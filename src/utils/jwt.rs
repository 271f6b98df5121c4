use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
}

pub struct JWT {
    key_enc: EncodingKey,
    key_dec: DecodingKey,
    duration: TimeDelta,
}

impl JWT {
    pub fn new(secret: String, duration: TimeDelta) -> Self {
        Self {
            duration,
            key_enc: EncodingKey::from_secret(secret.as_ref()),
            key_dec: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    pub fn create_by_login(&self, user_id: &str) -> Result<String, String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + self.duration).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.key_enc).map_err(|e| e.to_string())
    }

    pub fn decode(&self, token: &str) -> Result<Claims, String> {
        decode::<Claims>(token, &self.key_dec, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|err| err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use jsonwebtoken::errors::ErrorKind;

    const SECRET: &str = "some-secret";
    const SOMEONE: &str = "someone";

    #[test]
    fn jwt_sign_and_verify() {
        let jwt = JWT::new(SECRET.to_string(), Duration::minutes(1));
        let token = jwt.create_by_login(SOMEONE).unwrap();
        let claims = jwt.decode(&token).unwrap();
        assert_eq!(claims.sub, SOMEONE);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn jwt_verify_expired_fail() {
        let key = EncodingKey::from_secret(SECRET.as_ref());
        let claims = Claims {
            sub: SOMEONE.to_string(),
            exp: 1,
            iat: 0,
        };
        let token = encode(&Header::default(), &claims, &key).unwrap();

        let res = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(SECRET.as_ref()),
            &Validation::new(Algorithm::HS256),
        );
        let kind = res.map_err(|e| e.into_kind()).err();
        assert_eq!(kind, Some(ErrorKind::ExpiredSignature));

        let jwt = JWT::new(SECRET.to_string(), Duration::minutes(1));
        assert!(jwt.decode(&token).is_err());
    }

    #[test]
    fn jwt_rejects_other_secret() {
        let jwt = JWT::new(SECRET.to_string(), Duration::minutes(1));
        let other = JWT::new("other-secret".to_string(), Duration::minutes(1));
        let token = other.create_by_login(SOMEONE).unwrap();
        assert!(jwt.decode(&token).is_err());
    }
}

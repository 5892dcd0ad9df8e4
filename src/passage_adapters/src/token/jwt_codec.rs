use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode,
    errors::ErrorKind,
};
use passage_core::{AccessClaims, AccessToken, AccessTokenCodec, Email, TokenCodecError, UserId};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

const HMAC_FAMILY: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Wire form of [`AccessClaims`].
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    exp: i64,
}

/// HS256 signer/verifier for access tokens, keyed by one process-wide secret.
#[derive(Clone)]
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtCodec {
    pub fn new(secret: &Secret<String>) -> Self {
        let bytes = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_FAMILY.to_vec();
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            validation,
        }
    }
}

impl AccessTokenCodec for JwtCodec {
    fn encode(&self, claims: &AccessClaims) -> Result<AccessToken, TokenCodecError> {
        let claims = Claims {
            sub: claims.sub.to_string(),
            email: claims.email.to_string(),
            exp: claims.exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map(AccessToken::new)
            .map_err(|e| TokenCodecError::SigningFailed(e.to_string()))
    }

    fn decode(&self, token: &str) -> Result<AccessClaims, TokenCodecError> {
        // Checked before the signature so a token signed with any other
        // algorithm family is never verified against the HMAC secret.
        let header = decode_header(token).map_err(|e| TokenCodecError::InvalidToken(e.to_string()))?;
        if !HMAC_FAMILY.contains(&header.alg) {
            return Err(TokenCodecError::UnexpectedAlgorithm(format!("{:?}", header.alg)));
        }

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenCodecError::Expired,
                ErrorKind::InvalidAlgorithm => {
                    TokenCodecError::UnexpectedAlgorithm(format!("{:?}", header.alg))
                }
                _ => TokenCodecError::InvalidToken(e.to_string()),
            }
        })?;

        let sub = UserId::parse(&data.claims.sub)
            .map_err(|e| TokenCodecError::InvalidToken(e.to_string()))?;
        let email = Email::parse(data.claims.email)
            .map_err(|e| TokenCodecError::InvalidToken(e.to_string()))?;

        Ok(AccessClaims {
            sub,
            email,
            exp: data.claims.exp,
        })
    }
}

use chrono::Utc;
use reqwest::Client;

use crate::{error::Error, spotify, types::SessionData};

/// Token lifecycle over one request's view of the session.
///
/// Borrows the session data so a refresh mutates the state the handler will
/// save back once the request settles. No cross-request refresh
/// de-duplication is attempted: two racing requests may both refresh, both
/// succeed against the provider, and last-writer-wins in the store.
pub struct TokenManager<'a> {
    http: &'a Client,
    session: &'a mut SessionData,
}

impl<'a> TokenManager<'a> {
    pub fn new(http: &'a Client, session: &'a mut SessionData) -> Self {
        TokenManager { http, session }
    }

    /// Returns a currently valid access token, refreshing first when the
    /// stored one has reached its (buffered) expiry.
    ///
    /// # Errors
    ///
    /// [`Error::AuthenticationRequired`] when the session holds no token,
    /// no refresh token, or the refresh exchange is rejected.
    pub async fn get_valid_token(&mut self) -> Result<String, Error> {
        let now = Utc::now().timestamp();
        match &self.session.token {
            None => Err(Error::AuthenticationRequired(
                "not logged in".to_string(),
            )),
            Some(token) if !token.is_expired(now) => Ok(token.access_token.clone()),
            Some(_) => {
                self.refresh().await?;
                self.session
                    .token
                    .as_ref()
                    .map(|token| token.access_token.clone())
                    .ok_or_else(|| Error::AuthenticationRequired("not logged in".to_string()))
            }
        }
    }

    async fn refresh(&mut self) -> Result<(), Error> {
        let Some(token) = self.session.token.as_mut() else {
            return Err(Error::AuthenticationRequired("not logged in".to_string()));
        };
        let Some(refresh) = token.refresh_token.clone() else {
            return Err(Error::AuthenticationRequired(
                "no refresh token; please log in again".to_string(),
            ));
        };

        let response = spotify::auth::refresh_token(self.http, &refresh).await?;
        token.apply(Utc::now().timestamp(), &response);
        Ok(())
    }
}

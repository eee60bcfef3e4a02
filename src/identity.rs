// Researcher identity - mock network sign-in with a persisted session

use std::time::{SystemTime, UNIX_EPOCH};

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::store::KeyValueStore;

const IDENTITY_KEY: &str = "identity";

pub const DEFAULT_EMAIL: &str = "researcher@myco.network";

const AVATARS: [&str; 2] = [
    "/images/avatars/mushroom.png",
    "/images/avatars/beaker.png",
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub avatar: String,
    pub joined_at: u64,
    pub contributions: u32,
    pub discoveries: u32,
}

/// The network is make-believe: any credential is accepted, a profile is
/// invented on the spot and kept around until logout.
pub struct IdentityStore {
    profile: Option<Profile>,
    store: Box<dyn KeyValueStore>,
}

impl IdentityStore {
    pub fn open(store: Box<dyn KeyValueStore>) -> Self {
        let profile = store
            .load(IDENTITY_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok());
        Self { profile, store }
    }

    pub fn current(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.profile.is_some()
    }

    /// Sign in with an email address. The username is whatever precedes the
    /// @, and returning researchers get a plausible activity history.
    pub fn login<R: Rng>(&mut self, rng: &mut R, email: &str) -> Profile {
        let email = if email.is_empty() { DEFAULT_EMAIL } else { email };
        let username = email
            .split('@')
            .next()
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or("Researcher");
        let profile = Profile {
            id: mint_id(rng),
            username: username.to_string(),
            email: email.to_string(),
            avatar: AVATARS[rng.gen_range(0..AVATARS.len())].to_string(),
            joined_at: unix_now(),
            contributions: rng.gen_range(10..60),
            discoveries: rng.gen_range(5..25),
        };
        self.adopt(profile)
    }

    /// Create a brand-new researcher with an empty activity ledger.
    pub fn register<R: Rng>(&mut self, rng: &mut R, username: &str, email: &str) -> Profile {
        let username = if username.is_empty() {
            "New Researcher"
        } else {
            username
        };
        let email = if email.is_empty() { DEFAULT_EMAIL } else { email };
        let profile = Profile {
            id: mint_id(rng),
            username: username.to_string(),
            email: email.to_string(),
            avatar: AVATARS[rng.gen_range(0..AVATARS.len())].to_string(),
            joined_at: unix_now(),
            contributions: 0,
            discoveries: 0,
        };
        self.adopt(profile)
    }

    pub fn logout(&mut self) {
        self.profile = None;
        self.store.remove(IDENTITY_KEY);
    }

    fn adopt(&mut self, profile: Profile) -> Profile {
        if let Ok(raw) = serde_json::to_string(&profile) {
            self.store.save(IDENTITY_KEY, &raw);
        }
        self.profile = Some(profile.clone());
        profile
    }
}

fn mint_id<R: Rng>(rng: &mut R) -> String {
    let mut id = String::from("usr_");
    for _ in 0..9 {
        let c = rng.sample(Alphanumeric) as char;
        id.push(c.to_ascii_lowercase());
    }
    id
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonFileStore, MemoryStore};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn login_accepts_anything_and_mints_a_profile() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut identity = IdentityStore::open(Box::new(MemoryStore::new()));

        let profile = identity.login(&mut rng, "spore.hunter@fungi.net");
        assert_eq!(profile.username, "spore.hunter");
        assert_eq!(profile.email, "spore.hunter@fungi.net");
        assert_eq!(profile.id.len(), "usr_".len() + 9);
        assert!(profile.id.starts_with("usr_"));
        assert!(profile.id["usr_".len()..]
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert!((10..60).contains(&profile.contributions));
        assert!((5..25).contains(&profile.discoveries));
        assert!(AVATARS.contains(&profile.avatar.as_str()));
        assert!(identity.is_signed_in());
    }

    #[test]
    fn blank_credentials_fall_back_to_the_house_identity() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut identity = IdentityStore::open(Box::new(MemoryStore::new()));

        let profile = identity.login(&mut rng, "");
        assert_eq!(profile.email, DEFAULT_EMAIL);
        assert_eq!(profile.username, "researcher");

        // An address with nothing before the @ still gets a readable name.
        let profile = identity.login(&mut rng, "@myco.network");
        assert_eq!(profile.username, "Researcher");
    }

    #[test]
    fn registration_starts_with_a_clean_ledger() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut identity = IdentityStore::open(Box::new(MemoryStore::new()));

        let profile = identity.register(&mut rng, "Spore Ranger", "");
        assert_eq!(profile.username, "Spore Ranger");
        assert_eq!(profile.email, DEFAULT_EMAIL);
        assert_eq!(profile.contributions, 0);
        assert_eq!(profile.discoveries, 0);

        let profile = identity.register(&mut rng, "", "lab@myco.network");
        assert_eq!(profile.username, "New Researcher");
    }

    #[test]
    fn sessions_survive_a_restart_until_logout() {
        let dir = std::env::temp_dir().join(format!(
            "mycelia-identity-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        let mut rng = StdRng::seed_from_u64(10);

        let minted = {
            let mut identity = IdentityStore::open(Box::new(JsonFileStore::new(&dir)));
            identity.login(&mut rng, "field@myco.network")
        };

        let mut reopened = IdentityStore::open(Box::new(JsonFileStore::new(&dir)));
        assert_eq!(reopened.current(), Some(&minted));

        reopened.logout();
        assert!(!reopened.is_signed_in());

        let after_logout = IdentityStore::open(Box::new(JsonFileStore::new(&dir)));
        assert_eq!(after_logout.current(), None);

        let _ = std::fs::remove_dir_all(&dir);
    }
}

use time::OffsetDateTime;

use crate::storage::Storage;
use crate::types::{RegistrantRecord, Role, User, UserPatch, USERS_LIST_KEY, USER_KEY};
use crate::utils::notify::RegistrationNotifier;

/// Read the session user blob. Anything that does not parse reads as "nobody
/// logged in" rather than an error.
pub fn load_current_user(storage: &dyn Storage) -> Option<User> {
    let raw = storage.get(USER_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::event!(target: "auction", tracing::Level::WARN, "Stored session user does not parse, treating as absent: {:#?}", e);
            None
        }
    }
}

/// Log out: flip `is_logged_in` in place, keeping the rest of the record so
/// the next login can restore it. An unparseable blob gets dropped instead,
/// since there is nothing in it worth keeping.
#[tracing::instrument(name = "Logging out current user", skip(storage))]
pub fn clear_current_user(storage: &dyn Storage) {
    let Some(raw) = storage.get(USER_KEY) else {
        return;
    };
    match serde_json::from_str::<User>(&raw) {
        Ok(mut user) => {
            user.is_logged_in = false;
            storage.set(
                USER_KEY,
                &serde_json::to_string(&user).expect("session user serializes to JSON"),
            );
        }
        Err(e) => {
            tracing::event!(target: "auction", tracing::Level::WARN, "Stored session user does not parse, removing it: {:#?}", e);
            storage.remove(USER_KEY);
        }
    }
}

/// Read the full registrant list; malformed JSON reads as an empty list.
pub fn load_users_list(storage: &dyn Storage) -> Vec<RegistrantRecord> {
    let Some(raw) = storage.get(USERS_LIST_KEY) else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(list) => list,
        Err(e) => {
            tracing::event!(target: "auction", tracing::Level::WARN, "Stored registrant list does not parse, treating as empty: {:#?}", e);
            Vec::new()
        }
    }
}

pub fn save_users_list(storage: &dyn Storage, list: &[RegistrantRecord]) {
    storage.set(
        USERS_LIST_KEY,
        &serde_json::to_string(list).expect("registrant list serializes to JSON"),
    );
}

/// Merge a login or registration attempt into storage.
///
/// Writes the fully resolved session record, upserts the registrant list
/// entry for the email (at most one entry per email), and — only when the
/// email was never seen before and the resolved role is participant —
/// dispatches a single admin notification. Field precedence is documented on
/// [`UserPatch`]; `joined_at` is first-write-wins forever.
#[tracing::instrument(name = "Saving current user", skip(storage, notifier, patch), fields(user_email = %patch.email))]
pub fn save_current_user(
    storage: &dyn Storage,
    notifier: &dyn RegistrationNotifier,
    patch: UserPatch,
) {
    if patch.email.is_empty() {
        tracing::event!(target: "auction", tracing::Level::WARN, "save_current_user called without an email, ignoring");
        return;
    }

    let mut list = load_users_list(storage);
    let now = OffsetDateTime::now_utc();

    let index = list.iter().position(|u| u.email == patch.email);
    let previous = index.map(|i| list[i].clone());

    let merged = User {
        email: patch.email,
        role: patch
            .role
            .or(previous.as_ref().map(|p| p.role))
            .unwrap_or(Role::Participant),
        password: patch
            .password
            .or_else(|| previous.as_ref().map(|p| p.password.clone()))
            .unwrap_or_default(),
        nickname: patch
            .nickname
            .or_else(|| previous.as_ref().map(|p| p.nickname.clone()))
            .unwrap_or_default(),
        joined_at: previous
            .as_ref()
            .map(|p| p.joined_at)
            .or(patch.joined_at)
            .unwrap_or(now),
        is_logged_in: patch.is_logged_in != Some(false),
    };

    storage.set(
        USER_KEY,
        &serde_json::to_string(&merged).expect("session user serializes to JSON"),
    );

    let entry = merged.record();
    let is_new_user = match index {
        Some(i) => {
            list[i] = entry.clone();
            false
        }
        None => {
            list.push(entry.clone());
            true
        }
    };
    save_users_list(storage, &list);

    if is_new_user && merged.role == Role::Participant {
        notifier.dispatch(&entry);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use time::macros::datetime;

    use super::*;
    use crate::storage::MemoryStorage;
    use crate::utils::notify::NullNotifier;

    #[derive(Default)]
    struct CountingNotifier {
        dispatched: AtomicUsize,
    }

    impl RegistrationNotifier for CountingNotifier {
        fn dispatch(&self, _registrant: &RegistrantRecord) {
            self.dispatched.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn registration_patch(email: &str) -> UserPatch {
        UserPatch {
            email: email.to_string(),
            password: Some("123456".to_string()),
            nickname: Some("Alice".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn first_registration_fills_defaults() {
        let storage = MemoryStorage::new();

        save_current_user(&storage, &NullNotifier, registration_patch("a@example.com"));

        let user = load_current_user(&storage).expect("session user should be stored");
        assert_eq!(user.email, "a@example.com");
        assert_eq!(user.password, "123456");
        assert_eq!(user.nickname, "Alice");
        assert_eq!(user.role, Role::Participant);
        assert!(user.is_logged_in);

        let list = load_users_list(&storage);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0], user.record());
    }

    #[test]
    fn repeat_login_restores_stored_fields() {
        let storage = MemoryStorage::new();
        save_current_user(&storage, &NullNotifier, registration_patch("a@example.com"));
        let registered = load_current_user(&storage).unwrap();

        // a bare login attempt carries only email and password
        save_current_user(
            &storage,
            &NullNotifier,
            UserPatch {
                email: "a@example.com".to_string(),
                password: Some("123456".to_string()),
                ..Default::default()
            },
        );

        let logged_in = load_current_user(&storage).unwrap();
        assert_eq!(logged_in.nickname, "Alice");
        assert_eq!(logged_in.joined_at, registered.joined_at);
        assert_eq!(logged_in, registered);

        let list = load_users_list(&storage);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0], registered.record());
    }

    #[test]
    fn joined_at_is_first_write_wins() {
        let storage = MemoryStorage::new();
        let original = datetime!(2024-01-01 00:00:00 UTC);

        save_current_user(
            &storage,
            &NullNotifier,
            UserPatch {
                email: "a@example.com".to_string(),
                joined_at: Some(original),
                ..Default::default()
            },
        );
        save_current_user(
            &storage,
            &NullNotifier,
            UserPatch {
                email: "a@example.com".to_string(),
                joined_at: Some(datetime!(2025-06-15 12:00:00 UTC)),
                ..Default::default()
            },
        );

        assert_eq!(load_current_user(&storage).unwrap().joined_at, original);
        assert_eq!(load_users_list(&storage)[0].joined_at, original);
    }

    #[test]
    fn present_but_empty_password_overwrites() {
        let storage = MemoryStorage::new();
        save_current_user(&storage, &NullNotifier, registration_patch("a@example.com"));

        save_current_user(
            &storage,
            &NullNotifier,
            UserPatch {
                email: "a@example.com".to_string(),
                password: Some(String::new()),
                ..Default::default()
            },
        );

        assert_eq!(load_current_user(&storage).unwrap().password, "");
    }

    #[test]
    fn missing_email_writes_nothing() {
        let storage = MemoryStorage::new();
        let notifier = CountingNotifier::default();

        save_current_user(&storage, &notifier, UserPatch::default());

        assert_eq!(storage.get(USER_KEY), None);
        assert_eq!(storage.get(USERS_LIST_KEY), None);
        assert_eq!(notifier.dispatched.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn new_participant_notifies_exactly_once() {
        let storage = MemoryStorage::new();
        let notifier = CountingNotifier::default();

        save_current_user(&storage, &notifier, registration_patch("a@example.com"));
        assert_eq!(notifier.dispatched.load(Ordering::SeqCst), 1);

        // repeat login for the same email stays quiet
        save_current_user(&storage, &notifier, registration_patch("a@example.com"));
        assert_eq!(notifier.dispatched.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn new_admin_does_not_notify() {
        let storage = MemoryStorage::new();
        let notifier = CountingNotifier::default();

        save_current_user(
            &storage,
            &notifier,
            UserPatch {
                email: "admin@example.com".to_string(),
                role: Some(Role::Admin),
                ..Default::default()
            },
        );

        assert_eq!(notifier.dispatched.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn explicit_logged_out_patch_is_respected() {
        let storage = MemoryStorage::new();

        save_current_user(
            &storage,
            &NullNotifier,
            UserPatch {
                email: "a@example.com".to_string(),
                is_logged_in: Some(false),
                ..Default::default()
            },
        );

        assert!(!load_current_user(&storage).unwrap().is_logged_in);
    }

    #[test]
    fn logout_flips_flag_but_keeps_record() {
        let storage = MemoryStorage::new();
        save_current_user(&storage, &NullNotifier, registration_patch("a@example.com"));

        clear_current_user(&storage);

        let user = load_current_user(&storage).expect("record should survive logout");
        assert!(!user.is_logged_in);
        assert_eq!(user.nickname, "Alice");
        assert_eq!(load_users_list(&storage).len(), 1);
    }

    #[test]
    fn logout_drops_unparseable_session_blob() {
        let storage = MemoryStorage::new();
        storage.set(USER_KEY, "not json");

        clear_current_user(&storage);

        assert_eq!(storage.get(USER_KEY), None);
    }

    #[test]
    fn malformed_stored_blobs_read_as_absent() {
        let storage = MemoryStorage::new();
        storage.set(USER_KEY, "{\"email\": 42}");
        storage.set(USERS_LIST_KEY, "null");

        assert_eq!(load_current_user(&storage), None);
        assert!(load_users_list(&storage).is_empty());

        // a merge on top of garbage still works
        save_current_user(&storage, &NullNotifier, registration_patch("a@example.com"));
        assert_eq!(load_users_list(&storage).len(), 1);
    }
}

use super::*;
use crate::auth::session::Session;
use crate::auth::testing::confirmed_session;
use crate::net::gotrue::SESSION_STORAGE_KEY;

#[test]
fn load_reads_nothing_outside_the_browser() {
    assert_eq!(load_json::<Session>(SESSION_STORAGE_KEY), None);
}

#[test]
fn saved_session_does_not_survive_without_browser_storage() {
    let session = confirmed_session("walker@example.com");
    save_json(SESSION_STORAGE_KEY, &session);
    assert_eq!(load_json::<Session>(SESSION_STORAGE_KEY), None);
    remove(SESSION_STORAGE_KEY);
    assert_eq!(load_json::<Session>(SESSION_STORAGE_KEY), None);
}

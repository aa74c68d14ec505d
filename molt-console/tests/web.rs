//! Browser-only checks. Run with `wasm-pack test --headless --firefox molt-console`.
#![cfg(target_arch = "wasm32")]

use molt_console::connections::{
    load_connections, remove_connection, save_connections, Connection, Dialect,
};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn saved_connections_survive_reload_without_password() {
    let mut conn = Connection::draft(Dialect::PostgreSQL);
    conn.name = "source".into();
    conn.username = "postgres".into();
    conn.password = "secret".into();
    conn.database = "orders".into();
    let conn = conn.finalize().expect("valid connection");

    save_connections(std::slice::from_ref(&conn)).expect("storage available");
    let loaded = load_connections();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, conn.id);
    assert_eq!(loaded[0].password, "");

    save_connections(&remove_connection(&loaded, &conn.id)).expect("storage available");
    assert!(load_connections().is_empty());
}

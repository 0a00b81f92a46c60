use crate::contract::model::NewUser;

/// Accounts seeded when `seed_demo` is on (in-memory `--mock` runs).
pub fn demo_users() -> Vec<NewUser> {
    [
        ("alice", "Alice Liddell", "alice@blogdesk.dev"),
        ("bob", "Bob Marley", "bob@blogdesk.dev"),
        ("carol", "Carol Danvers", "carol@blogdesk.dev"),
        ("dave", "Dave Grohl", "dave@blogdesk.dev"),
        ("erin", "Erin Brockovich", "erin@blogdesk.dev"),
        ("frank", "Frank Herbert", "frank@blogdesk.dev"),
        ("grace", "Grace Hopper", "grace@blogdesk.dev"),
        ("heidi", "Heidi Klum", "heidi@blogdesk.dev"),
        ("ivan", "Ivan Drago", "ivan@blogdesk.dev"),
        ("judy", "Judy Hopps", "judy@blogdesk.dev"),
        ("mallory", "Mallory Archer", "mallory@blogdesk.dev"),
        ("oscar", "Oscar Wilde", "oscar@blogdesk.dev"),
    ]
    .into_iter()
    .map(|(username, name, email)| NewUser {
        username: username.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        profile_image: None,
    })
    .collect()
}

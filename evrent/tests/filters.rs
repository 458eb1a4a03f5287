use evrent_client::domain::{Role, User, Verification};
use evrent_client::filter::{filter_customers, matches_search, Choice};
use quickcheck_macros::quickcheck;

fn user(name: &str, verified: bool, active: bool) -> User {
    User {
        id: name.into(),
        full_name: name.into(),
        email: format!("{}@mail.test", name.len()),
        phone: "0901234567".into(),
        role: Role::Renter,
        is_active: active,
        verification: Verification {
            verified,
            ..Default::default()
        },
        station_id: None,
        is_high_risk: false,
        created_at: None,
        updated_at: None,
    }
}

fn users(names: &[(String, bool, bool)]) -> Vec<User> {
    names
        .iter()
        .map(|(name, verified, active)| user(name, *verified, *active))
        .collect()
}

#[quickcheck]
fn surrounding_whitespace_does_not_change_the_result(
    names: Vec<(String, bool, bool)>,
    search: String,
) -> bool {
    let users = users(&names);
    let padded = format!("  {search}\t");

    filter_customers(&users, &search, &Choice::All, &Choice::All)
        == filter_customers(&users, &padded, &Choice::All, &Choice::All)
}

#[quickcheck]
fn every_match_contains_the_search(names: Vec<(String, bool, bool)>, search: String) -> bool {
    let users = users(&names);
    let needle = search.trim().to_lowercase();

    filter_customers(&users, &search, &Choice::All, &Choice::All)
        .iter()
        .all(|x| {
            needle.is_empty()
                || x.full_name.to_lowercase().contains(&needle)
                || x.email.to_lowercase().contains(&needle)
                || x.phone.contains(&needle)
        })
}

#[quickcheck]
fn every_user_containing_the_search_is_kept(
    names: Vec<(String, bool, bool)>,
    search: String,
) -> bool {
    let users = users(&names);
    let needle = search.trim().to_lowercase();
    let found = filter_customers(&users, &search, &Choice::All, &Choice::All);

    users
        .iter()
        .filter(|x| {
            needle.is_empty()
                || x.full_name.to_lowercase().contains(&needle)
                || x.email.to_lowercase().contains(&needle)
                || x.phone.contains(&needle)
        })
        .all(|x| found.iter().any(|y| std::ptr::eq(*y, x)))
}

#[quickcheck]
fn search_picks_a_name_out_of_the_list(names: Vec<String>, pick: usize) -> bool {
    if names.is_empty() {
        return true;
    }
    let users: Vec<User> = names.iter().map(|x| user(x, false, true)).collect();
    let target = &users[pick % users.len()];
    let found = filter_customers(&users, &target.full_name, &Choice::All, &Choice::All);

    found.iter().any(|x| std::ptr::eq(*x, target))
}

#[quickcheck]
fn all_filters_with_blank_search_keep_everything(names: Vec<(String, bool, bool)>) -> bool {
    let users = users(&names);
    filter_customers(&users, "   ", &Choice::All, &Choice::All).len() == users.len()
}

#[quickcheck]
fn filtering_is_idempotent(names: Vec<(String, bool, bool)>, search: String, verified: bool) -> bool {
    let users = users(&names);
    let verified = Choice::Only(verified);

    let once: Vec<User> = filter_customers(&users, &search, &verified, &Choice::All)
        .into_iter()
        .cloned()
        .collect();
    let twice: Vec<User> = filter_customers(&once, &search, &verified, &Choice::All)
        .into_iter()
        .cloned()
        .collect();

    twice == once
}

#[test]
fn search_is_case_insensitive() {
    assert!(matches_search("NGUYỄN", &["Nguyễn Văn A"]));
    assert!(matches_search(" van ", &["Nguyễn Van A"]));
    assert!(!matches_search("trần", &["Nguyễn Văn A"]));
}

#[test]
fn status_filters_combine() {
    let users = vec![
        user("an", true, true),
        user("binh", false, true),
        user("chi", true, false),
    ];

    let found = filter_customers(&users, "", &Choice::Only(true), &Choice::Only(true));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].full_name, "an");

    let locked = filter_customers(&users, "", &Choice::All, &Choice::Only(false));
    assert_eq!(locked.len(), 1);
    assert_eq!(locked[0].full_name, "chi");
}

use std::sync::Once;

use fetchdeck_core::{
    update, AppState, Effect, FetchError, LoadState, Msg, OverlapPolicy, PanelStatus, Post,
    Request, StateSettings, User,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(fetchdeck_logging::initialize_for_tests);
}

fn user(id: u32, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
        username: name.to_lowercase(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: None,
        website: None,
        address: None,
        company: None,
    }
}

fn request_id_of(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Fetch { request_id, .. } | Effect::ScheduleSearch { request_id, .. } => {
                Some(*request_id)
            }
            Effect::CancelSearch => None,
        })
        .expect("effect with request id")
}

#[test]
fn load_users_moves_idle_to_loading_and_emits_fetch() {
    init_logging();
    let state = AppState::new();
    assert!(state.users().is_idle());

    let (mut next, effects) = update(state, Msg::LoadUsers);

    assert!(next.users().is_loading());
    assert!(next.consume_dirty());
    assert_eq!(
        effects,
        vec![Effect::Fetch {
            request_id: 1,
            request: Request::Users,
        }]
    );
}

#[test]
fn success_carries_the_exact_payload() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::LoadUsers);
    let request_id = request_id_of(&effects);
    let payload = vec![user(1, "Leanne"), user(2, "Ervin")];

    let (next, effects) = update(
        state,
        Msg::UsersLoaded {
            request_id,
            result: Ok(payload.clone()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(next.users(), &LoadState::Loaded(payload));
    let view = next.view();
    assert_eq!(view.users.status, PanelStatus::Loaded { count: 2 });
    assert_eq!(
        view.users.rows,
        vec![
            "Leanne (@leanne) <leanne@example.com>".to_string(),
            "Ervin (@ervin) <ervin@example.com>".to_string(),
        ]
    );
}

#[test]
fn failure_carries_the_exact_kind() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::LoadPosts);
    let request_id = request_id_of(&effects);

    let (next, _) = update(
        state,
        Msg::PostsLoaded {
            request_id,
            result: Err(FetchError::ServerError(404)),
        },
    );

    assert_eq!(next.posts(), &LoadState::Error(FetchError::ServerError(404)));
    assert_eq!(
        next.view().posts.status,
        PanelStatus::Failed {
            message: "Server error (status 404)".to_string()
        }
    );
}

#[test]
fn retry_after_error_reenters_loading_with_new_request_id() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::LoadPosts);
    let first = request_id_of(&effects);
    let (state, _) = update(
        state,
        Msg::PostsLoaded {
            request_id: first,
            result: Err(FetchError::Unknown),
        },
    );

    let (state, effects) = update(state, Msg::LoadPosts);
    let second = request_id_of(&effects);

    assert!(second > first);
    assert!(state.posts().is_loading());
}

#[test]
fn overlapping_loads_are_last_write_wins_by_default() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::LoadUsers);
    let older = request_id_of(&effects);
    let (state, effects) = update(state, Msg::LoadUsers);
    let newer = request_id_of(&effects);

    let (state, _) = update(
        state,
        Msg::UsersLoaded {
            request_id: newer,
            result: Ok(vec![user(2, "Newer")]),
        },
    );
    let (state, _) = update(
        state,
        Msg::UsersLoaded {
            request_id: older,
            result: Ok(vec![user(1, "Older")]),
        },
    );

    assert_eq!(state.users(), &LoadState::Loaded(vec![user(1, "Older")]));
}

#[test]
fn latest_request_policy_ignores_superseded_completions() {
    init_logging();
    let settings = StateSettings {
        overlap_policy: OverlapPolicy::LatestRequestWins,
        ..StateSettings::default()
    };
    let (state, effects) = update(AppState::with_settings(settings), Msg::LoadUsers);
    let older = request_id_of(&effects);
    let (state, effects) = update(state, Msg::LoadUsers);
    let newer = request_id_of(&effects);

    let (state, _) = update(
        state,
        Msg::UsersLoaded {
            request_id: newer,
            result: Ok(vec![user(2, "Newer")]),
        },
    );
    let (mut state, _) = update(
        state,
        Msg::UsersLoaded {
            request_id: older,
            result: Err(FetchError::Unknown),
        },
    );

    assert!(state.consume_dirty());
    assert_eq!(state.users(), &LoadState::Loaded(vec![user(2, "Newer")]));
    let (mut state, _) = update(
        state,
        Msg::UsersLoaded {
            request_id: older,
            result: Err(FetchError::Unknown),
        },
    );
    assert!(!state.consume_dirty());
}

#[test]
fn comments_track_their_post() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::LoadComments { post_id: 3 });
    assert_eq!(
        effects,
        vec![Effect::Fetch {
            request_id: 1,
            request: Request::Comments { post_id: 3 },
        }]
    );
    assert_eq!(state.comments_post(), Some(3));
    assert_eq!(state.view().comments.title, "Comments on post #3");
}

#[test]
fn posts_render_id_and_title() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::LoadPosts);
    let request_id = request_id_of(&effects);
    let (state, _) = update(
        state,
        Msg::PostsLoaded {
            request_id,
            result: Ok(vec![Post {
                user_id: 1,
                id: 9,
                title: "nesciunt iure omnis".to_string(),
                body: "quo et expedita".to_string(),
            }]),
        },
    );

    assert_eq!(state.view().posts.rows, vec!["#9 nesciunt iure omnis".to_string()]);
}

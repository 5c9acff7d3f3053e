//! The session state manager: user registry, the single session, and the
//! post feed, all in memory. Every mutation goes through the operations
//! here; each one either fully succeeds or fails without side effects.

use lichtbild_common::model::{
    Id, LichtbildStampGenerator,
    post::{Post, PostMarker},
    user::{User, UserMarker, Username},
};
use thiserror::Error;
use tracing::debug;

pub type Result<T, E = StateError> = std::result::Result<T, E>;

#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum StateError {
    #[error("Username {0} is already taken.")]
    DuplicateUsername(Username),
    #[error("No user with username {0} was found.")]
    UserNotFound(Username),
    #[error("Post with id {0} was not found.")]
    PostNotFound(Id<PostMarker>),
}

#[derive(Clone, Debug, Default)]
pub struct SessionState {
    users: Vec<User>,
    session: Option<Id<UserMarker>>,
    // Newest first. New posts prepend, nothing else reorders.
    posts: Vec<Post>,
    stamp_generator: LichtbildStampGenerator,
    default_profile_pic_url: String,
}

impl SessionState {
    #[must_use]
    pub fn new(default_profile_pic_url: String) -> Self {
        Self {
            default_profile_pic_url,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn find_user(&self, username: &Username) -> Option<&User> {
        self.users.iter().find(|user| &user.username == username)
    }

    /// Inserts a new user into the registry without touching the session.
    /// `register` goes through here, as does demo seeding.
    pub fn create_user(&mut self, username: Username) -> Result<User> {
        if self.find_user(&username).is_some() {
            return Err(StateError::DuplicateUsername(username));
        }

        let user = User {
            id: Id::new(self.stamp_generator.generate()),
            username,
            profile_pic_url: self.default_profile_pic_url.clone(),
        };
        debug!(id = %user.id, username = %user.username, "Created user");

        self.users.push(user.clone());
        Ok(user)
    }

    pub fn register(&mut self, username: Username) -> Result<User> {
        let user = self.create_user(username)?;
        self.session = Some(user.id);
        debug!(username = %user.username, "Registered and logged in");

        Ok(user)
    }

    pub fn login(&mut self, username: &Username) -> Result<User> {
        let user = self
            .find_user(username)
            .ok_or_else(|| StateError::UserNotFound(username.clone()))?
            .clone();

        self.session = Some(user.id);
        debug!(username = %user.username, "Logged in");

        Ok(user)
    }

    #[must_use]
    pub fn current_session(&self) -> Option<&User> {
        self.session
            .and_then(|id| self.users.iter().find(|user| user.id == id))
    }

    /// The caller guarantees `author` is the current session user and that
    /// both fields are non-empty; neither is re-checked here.
    pub fn create_post(&mut self, author: User, image_url: String, description: String) -> Post {
        let post = Post {
            id: Id::new(self.stamp_generator.generate()),
            author,
            image_url,
            description,
            comments: Vec::new(),
        };
        debug!(id = %post.id, author = %post.author.username, "Created post");

        self.posts.insert(0, post.clone());
        post
    }

    pub fn add_comment(&mut self, post_id: Id<PostMarker>, text: String) -> Result<()> {
        let post = self
            .posts
            .iter_mut()
            .find(|post| post.id == post_id)
            .ok_or(StateError::PostNotFound(post_id))?;

        debug!(id = %post_id, "Added comment");
        post.comments.push(text);
        Ok(())
    }

    /// All posts, newest first. Mutation only happens through `create_post`
    /// and `add_comment`.
    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }
}

#[cfg(test)]
mod tests {
    use crate::store::{SessionState, StateError};
    use lichtbild_common::model::user::Username;

    fn state() -> SessionState {
        SessionState::new("https://via.placeholder.com/50".to_owned())
    }

    fn username(name: &str) -> Username {
        Username::new(name.to_owned()).unwrap()
    }

    #[test]
    fn register_sets_session() {
        let mut state = state();

        let user = state.register(username("alice")).unwrap();

        assert_eq!(user.username, username("alice"));
        assert_eq!(user.profile_pic_url, "https://via.placeholder.com/50");
        assert_eq!(state.current_session(), Some(&user));
    }

    #[test]
    fn register_duplicate_fails_without_side_effects() {
        let mut state = state();
        let alice = state.register(username("alice")).unwrap();

        let result = state.register(username("alice"));

        assert_eq!(result, Err(StateError::DuplicateUsername(username("alice"))));
        assert_eq!(state.find_user(&username("alice")), Some(&alice));
        assert_eq!(state.current_session(), Some(&alice));
    }

    #[test]
    fn login_unknown_user_fails_without_touching_session() {
        let mut state = state();

        let result = state.login(&username("nobody"));

        assert_eq!(result, Err(StateError::UserNotFound(username("nobody"))));
        assert_eq!(state.current_session(), None);

        let alice = state.register(username("alice")).unwrap();
        let result = state.login(&username("nobody"));

        assert_eq!(result, Err(StateError::UserNotFound(username("nobody"))));
        assert_eq!(state.current_session(), Some(&alice));
    }

    #[test]
    fn login_is_case_sensitive() {
        let mut state = state();
        state.register(username("alice")).unwrap();

        assert_eq!(
            state.login(&username("Alice")),
            Err(StateError::UserNotFound(username("Alice")))
        );
    }

    #[test]
    fn create_user_does_not_log_in() {
        let mut state = state();

        state.create_user(username("john_doe")).unwrap();

        assert_eq!(state.current_session(), None);
        assert!(state.find_user(&username("john_doe")).is_some());
    }

    #[test]
    fn new_posts_prepend() {
        let mut state = state();
        let alice = state.register(username("alice")).unwrap();

        let first = state.create_post(alice.clone(), "a.png".to_owned(), "first".to_owned());
        let second = state.create_post(alice, "b.png".to_owned(), "second".to_owned());

        assert_eq!(state.posts(), [second, first]);
    }

    #[test]
    fn comments_append_in_submission_order() {
        let mut state = state();
        let alice = state.register(username("alice")).unwrap();
        let other = state.create_post(alice.clone(), "a.png".to_owned(), "other".to_owned());
        let post = state.create_post(alice, "b.png".to_owned(), "target".to_owned());

        state.add_comment(post.id, "nice!".to_owned()).unwrap();
        state.add_comment(post.id, "wow".to_owned()).unwrap();

        assert_eq!(state.posts()[0].comments, ["nice!", "wow"]);
        assert_eq!(state.posts()[1], other);
    }

    #[test]
    fn comment_on_unknown_post_fails_without_side_effects() {
        let mut state = state();
        let alice = state.register(username("alice")).unwrap();
        let post = state.create_post(alice, "a.png".to_owned(), "hi".to_owned());

        let bogus_id = 0xDEAD_BEEF_u64.into();
        let result = state.add_comment(bogus_id, "nice!".to_owned());

        assert_eq!(result, Err(StateError::PostNotFound(bogus_id)));
        assert_eq!(state.posts(), [post]);
    }

    #[test]
    fn full_session_scenario() {
        let mut state = state();

        state.register(username("john")).unwrap();
        assert_eq!(
            state.login(&username("jane")),
            Err(StateError::UserNotFound(username("jane")))
        );

        let jane = state.register(username("jane")).unwrap();
        assert_eq!(state.current_session(), Some(&jane));

        let post = state.create_post(jane.clone(), "img.png".to_owned(), "hi".to_owned());

        assert_eq!(state.posts().len(), 1);
        assert_eq!(state.posts()[0].author, jane);
        assert!(state.posts()[0].comments.is_empty());

        state.add_comment(post.id, "cool".to_owned()).unwrap();
        assert_eq!(state.posts()[0].comments, ["cool"]);
    }
}

// Copyright (c) 2024-2025 FriendGraph Contributors.
// SPDX-License-Identifier: Apache-2.0
//
//! User and friendship service
//!
//! Composes [`UserStore`] calls into the graph protocols: creating users,
//! linking friends in both directions and unlinking a deleted user from
//! every former friend.
//!
//! Every protocol that writes more than one record builds a [`CommitSet`]
//! and commits it in one atomic batch, so a failed write never leaves a
//! half-linked pair or a dangling back-reference. Mutations also hold
//! `mutation_lock` from their first read to their commit; without it two
//! concurrent links on the same user would each overwrite the other's
//! adjacency list. Reads go straight to the store.

pub mod requests;

use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::config::FriendGraphConfig;
use crate::error::{FriendGraphError, FriendGraphResult};
use crate::storage::id::next_user_id;
use crate::storage::{CommitSet, User, UserStore};
use requests::{FriendPair, NewAge, NewUser, TargetId};

pub struct UserService {
    store: UserStore,
    mutation_lock: Mutex<()>,
}

impl UserService {
    pub fn new(store: UserStore) -> Self {
        Self {
            store,
            mutation_lock: Mutex::new(()),
        }
    }

    /// Open the configured store and wrap it in a service
    pub fn open(config: &FriendGraphConfig) -> FriendGraphResult<Self> {
        Ok(Self::new(UserStore::open(config)?))
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    /// Create a user and return its freshly minted id
    ///
    /// Initial friends must already exist; each one gets the new id appended
    /// to its own list in the same commit.
    pub fn create_user(&self, request: NewUser) -> FriendGraphResult<String> {
        request.validate()?;
        if !request.id.is_empty() {
            debug!("Ignoring client supplied id '{}'", request.id);
        }

        let mut user = User::new(request.name, request.age);
        for friend_id in &request.friends {
            user.add_friend(friend_id);
        }

        let _guard = self.mutation_lock.lock();

        if user.friends.is_empty() {
            let id = self.store.put(&mut user)?;
            info!("Created user '{}' ({})", user.name, id);
            return Ok(id);
        }

        user.id = next_user_id();
        let mut set = CommitSet::new();
        for friend_id in &user.friends {
            let mut friend = self
                .store
                .get(friend_id)?
                .ok_or_else(|| FriendGraphError::not_found(friend_id.clone()))?;
            friend.add_friend(&user.id);
            set.put(friend);
        }

        let id = user.id.clone();
        let friend_count = user.friends.len();
        let name = user.name.clone();
        set.put(user);
        self.store.commit(set)?;

        info!("Created user '{}' ({}) with {} friends", name, id, friend_count);
        Ok(id)
    }

    pub fn get_user(&self, id: &str) -> FriendGraphResult<Option<User>> {
        if id.is_empty() {
            return Ok(None);
        }
        self.store.get(id)
    }

    /// Replace the age of `id`; `false` when the user does not exist
    pub fn update_age(&self, id: &str, request: NewAge) -> FriendGraphResult<bool> {
        request.validate()?;

        let _guard = self.mutation_lock.lock();

        let mut user = match self.get_user(id)? {
            Some(user) => user,
            None => {
                debug!("update_age: user '{}' not found", id);
                return Ok(false);
            }
        };

        user.age = request.new_age;
        self.store.put(&mut user)?;
        debug!("Updated age of user '{}' to {}", id, user.age);
        Ok(true)
    }

    /// Link two users in both directions
    ///
    /// Returns the source and target names, or `None` when either id does
    /// not resolve. Linking an existing pair again writes nothing.
    pub fn make_friends(&self, pair: FriendPair) -> FriendGraphResult<Option<(String, String)>> {
        pair.validate()?;

        let _guard = self.mutation_lock.lock();

        let source = self.store.get(&pair.source_id)?;
        let target = self.store.get(&pair.target_id)?;
        let (mut source, mut target) = match (source, target) {
            (Some(source), Some(target)) => (source, target),
            _ => {
                debug!(
                    "make_friends: '{}' or '{}' not found",
                    pair.source_id, pair.target_id
                );
                return Ok(None);
            }
        };

        if source.is_friend_with(&target.id) {
            debug!("'{}' and '{}' are already friends", source.id, target.id);
            return Ok(Some((source.name, target.name)));
        }

        source.add_friend(&target.id);
        target.add_friend(&source.id);

        let names = (source.name.clone(), target.name.clone());
        let mut set = CommitSet::new();
        set.put(source).put(target);
        self.store.commit(set)?;

        info!("Linked '{}' and '{}'", pair.source_id, pair.target_id);
        Ok(Some(names))
    }

    /// Resolve the friends of `id` in adjacency-list order
    ///
    /// Friend ids that no longer resolve are skipped.
    pub fn get_friends(&self, id: &str) -> FriendGraphResult<Option<Vec<User>>> {
        let user = match self.get_user(id)? {
            Some(user) => user,
            None => return Ok(None),
        };

        let mut friends = Vec::with_capacity(user.friends.len());
        for friend_id in &user.friends {
            match self.store.get(friend_id)? {
                Some(friend) => friends.push(friend),
                None => warn!(
                    "User '{}' references missing friend '{}', skipping",
                    id, friend_id
                ),
            }
        }
        Ok(Some(friends))
    }

    /// Delete a user and remove it from every former friend's list
    ///
    /// Returns the deleted user's name, or `None` if it did not exist.
    pub fn delete_user(&self, request: TargetId) -> FriendGraphResult<Option<String>> {
        request.validate()?;
        let id = request.target_id.as_str();

        let _guard = self.mutation_lock.lock();

        let user = match self.store.get(id)? {
            Some(user) => user,
            None => {
                debug!("delete_user: user '{}' not found", id);
                return Ok(None);
            }
        };

        let mut set = CommitSet::new();
        for friend_id in user.friends.iter().filter(|f| f.as_str() != id) {
            match self.store.get(friend_id)? {
                Some(mut friend) => {
                    if friend.remove_friend(id) {
                        set.put(friend);
                    }
                }
                None => warn!(
                    "User '{}' references missing friend '{}' during delete",
                    id, friend_id
                ),
            }
        }
        let unlinked = set.len();
        set.delete(id);
        self.store.commit(set)?;

        info!(
            "Deleted user '{}' ({}), unlinked from {} friends",
            user.name, id, unlinked
        );
        Ok(Some(user.name))
    }

    pub fn user_count(&self) -> FriendGraphResult<usize> {
        self.store.len()
    }

    /// Remove every user; administrative reset used by tests and tooling
    pub fn drop_all(&self) -> FriendGraphResult<()> {
        let _guard = self.mutation_lock.lock();
        self.store.clear()?;
        info!("Dropped all users");
        Ok(())
    }

    pub fn flush(&self) -> FriendGraphResult<()> {
        self.store.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::codec::encode_user;

    fn service() -> UserService {
        UserService::new(UserStore::in_memory().unwrap())
    }

    fn create(service: &UserService, name: &str, age: &str) -> String {
        service.create_user(NewUser::new(name, age)).unwrap()
    }

    #[test]
    fn test_create_ignores_client_id() {
        let service = service();
        let mut request = NewUser::new("a", "11");
        request.id = "client-chosen".to_string();
        let id = service.create_user(request).unwrap();
        assert_ne!(id, "client-chosen");
        assert!(service.get_user("client-chosen").unwrap().is_none());
        assert_eq!(service.get_user(&id).unwrap().unwrap().name, "a");
    }

    #[test]
    fn test_create_rejects_missing_fields() {
        let service = service();
        assert!(matches!(
            service.create_user(NewUser::new("", "11")),
            Err(FriendGraphError::Validation(_))
        ));
        assert_eq!(service.user_count().unwrap(), 0);
    }

    #[test]
    fn test_create_with_friends_links_back() {
        let service = service();
        let a = create(&service, "a", "11");
        let b = service
            .create_user(NewUser::new("b", "22").with_friends([a.clone(), a.clone()]))
            .unwrap();

        assert_eq!(service.get_user(&b).unwrap().unwrap().friends, vec![a.clone()]);
        assert_eq!(service.get_user(&a).unwrap().unwrap().friends, vec![b]);
    }

    #[test]
    fn test_create_with_unknown_friend_writes_nothing() {
        let service = service();
        let a = create(&service, "a", "11");
        let result =
            service.create_user(NewUser::new("b", "22").with_friends([a.clone(), "ghost".into()]));
        assert!(matches!(result, Err(FriendGraphError::NotFound(_))));
        assert_eq!(service.user_count().unwrap(), 1);
        assert!(service.get_user(&a).unwrap().unwrap().friends.is_empty());
    }

    #[test]
    fn test_update_age_only_touches_age() {
        let service = service();
        let a = create(&service, "a", "11");
        let b = create(&service, "b", "22");
        service.make_friends(FriendPair::new(&a, &b)).unwrap();
        let before = service.get_user(&a).unwrap().unwrap();

        assert!(service.update_age(&a, NewAge::new("100")).unwrap());

        let after = service.get_user(&a).unwrap().unwrap();
        assert_eq!(after.age, "100");
        assert_eq!(after.id, before.id);
        assert_eq!(after.name, before.name);
        assert_eq!(after.friends, before.friends);
    }

    #[test]
    fn test_update_age_missing_user() {
        let service = service();
        assert!(!service.update_age("nonexistent-id", NewAge::new("1")).unwrap());
        assert_eq!(service.user_count().unwrap(), 0);
    }

    #[test]
    fn test_make_friends_is_idempotent() {
        let service = service();
        let a = create(&service, "a", "11");
        let b = create(&service, "b", "22");

        for _ in 0..2 {
            let names = service.make_friends(FriendPair::new(&a, &b)).unwrap();
            assert_eq!(names, Some(("a".to_string(), "b".to_string())));
        }
        // reversed direction is the same link
        service.make_friends(FriendPair::new(&b, &a)).unwrap();

        assert_eq!(service.get_user(&a).unwrap().unwrap().friends, vec![b.clone()]);
        assert_eq!(service.get_user(&b).unwrap().unwrap().friends, vec![a]);
    }

    #[test]
    fn test_make_friends_with_missing_target_writes_nothing() {
        let service = service();
        let a = create(&service, "a", "11");
        assert_eq!(
            service
                .make_friends(FriendPair::new(&a, "nonexistent-id"))
                .unwrap(),
            None
        );
        assert!(service.get_user(&a).unwrap().unwrap().friends.is_empty());
    }

    #[test]
    fn test_make_friends_repairs_one_sided_link() {
        let service = service();
        let a = create(&service, "a", "11");
        let b = create(&service, "b", "22");

        // b -> a exists but a -> b does not
        let mut b_user = service.get_user(&b).unwrap().unwrap();
        b_user.friends.push(a.clone());
        service.store().put(&mut b_user).unwrap();

        service.make_friends(FriendPair::new(&a, &b)).unwrap();
        assert_eq!(service.get_user(&a).unwrap().unwrap().friends, vec![b.clone()]);
        assert_eq!(service.get_user(&b).unwrap().unwrap().friends, vec![a]);
    }

    #[test]
    fn test_get_friends_skips_dangling_ids() {
        let service = service();
        let a = create(&service, "a", "11");
        let b = create(&service, "b", "22");
        service.make_friends(FriendPair::new(&a, &b)).unwrap();

        let mut a_user = service.get_user(&a).unwrap().unwrap();
        a_user.friends.insert(0, "gone".to_string());
        service.store().put(&mut a_user).unwrap();

        let friends = service.get_friends(&a).unwrap().unwrap();
        assert_eq!(friends.len(), 1);
        assert_eq!(friends[0].id, b);
    }

    #[test]
    fn test_get_friends_missing_user() {
        let service = service();
        assert!(service.get_friends("nonexistent-id").unwrap().is_none());
    }

    #[test]
    fn test_get_friends_surfaces_corrupt_friend() {
        let service = service();
        let a = create(&service, "a", "11");
        let b = create(&service, "b", "22");
        service.make_friends(FriendPair::new(&a, &b)).unwrap();

        let mut bytes = encode_user(&service.get_user(&b).unwrap().unwrap()).unwrap();
        bytes[0] = 0;
        service.store().put_raw(&b, &bytes).unwrap();

        assert!(matches!(
            service.get_friends(&a),
            Err(FriendGraphError::Encoding(_))
        ));
    }

    #[test]
    fn test_delete_cascades_to_friends() {
        let service = service();
        let a = create(&service, "a", "11");
        let b = create(&service, "b", "22");
        let c = create(&service, "c", "33");
        service.make_friends(FriendPair::new(&a, &b)).unwrap();
        service.make_friends(FriendPair::new(&a, &c)).unwrap();
        service.make_friends(FriendPair::new(&b, &c)).unwrap();

        assert_eq!(
            service.delete_user(TargetId::new(&a)).unwrap(),
            Some("a".to_string())
        );

        assert!(service.get_user(&a).unwrap().is_none());
        assert_eq!(service.get_user(&b).unwrap().unwrap().friends, vec![c.clone()]);
        assert_eq!(service.get_user(&c).unwrap().unwrap().friends, vec![b]);
    }

    #[test]
    fn test_delete_missing_user() {
        let service = service();
        assert_eq!(
            service
                .delete_user(TargetId::new("nonexistent-id"))
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_delete_tolerates_dangling_friend() {
        let service = service();
        let mut user = User::new("a", "11").with_friends(vec!["gone".to_string()]);
        let a = service.store().put(&mut user).unwrap();

        assert_eq!(
            service.delete_user(TargetId::new(&a)).unwrap(),
            Some("a".to_string())
        );
        assert_eq!(service.user_count().unwrap(), 0);
    }

    #[test]
    fn test_drop_all() {
        let service = service();
        create(&service, "a", "11");
        create(&service, "b", "22");
        service.drop_all().unwrap();
        assert_eq!(service.user_count().unwrap(), 0);
    }
}

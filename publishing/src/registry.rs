//! Role registry: which addresses may write, review, publish, read, or vote.
//!
//! Mutations require an [`AdminCapability`], which only the contract owner
//! can obtain. The capability is tied to the deployment that minted it and
//! to the ownership epoch: transferring ownership invalidates every
//! capability minted before it.

use std::collections::{BTreeMap, BTreeSet};

use dnn_types::{Address, BlockHash, Role};
use serde::{Deserialize, Serialize};

use crate::error::DnnError;

/// Identity of a single contract deployment.
pub type DeploymentId = [u8; 32];

/// Derive a deployment identity from the chain seed, a per-deployment nonce,
/// and the owner.
pub fn deployment_id(owner: &Address, chain_seed: &BlockHash, nonce: u64) -> DeploymentId {
    dnn_crypto::blake2b_256_multi(&[
        b"dnn/deployment",
        chain_seed.as_bytes(),
        &nonce.to_be_bytes(),
        owner.as_str().as_bytes(),
    ])
}

/// Proof that the holder was the owner when it was minted.
///
/// Cannot be constructed outside this crate; obtain one with
/// [`RoleRegistry::admin`].
#[derive(Debug)]
pub struct AdminCapability {
    deployment: DeploymentId,
    owner: Address,
    epoch: u64,
}

impl AdminCapability {
    pub fn owner(&self) -> &Address {
        &self.owner
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoleRegistry {
    deployment: DeploymentId,
    owner: Address,
    owner_epoch: u64,
    roles: BTreeMap<Address, BTreeSet<Role>>,
}

impl RoleRegistry {
    pub fn new(owner: Address, deployment: DeploymentId) -> Self {
        Self {
            deployment,
            owner,
            owner_epoch: 0,
            roles: BTreeMap::new(),
        }
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    pub fn deployment(&self) -> &DeploymentId {
        &self.deployment
    }

    pub fn is_owner(&self, address: &Address) -> bool {
        &self.owner == address
    }

    /// Mint an admin capability for `caller`. Fails unless `caller` is the owner.
    pub fn admin(&self, caller: &Address) -> Result<AdminCapability, DnnError> {
        if !self.is_owner(caller) {
            return Err(DnnError::Unauthorized(caller.to_string()));
        }
        Ok(AdminCapability {
            deployment: self.deployment,
            owner: caller.clone(),
            epoch: self.owner_epoch,
        })
    }

    fn authorize(&self, admin: &AdminCapability) -> Result<(), DnnError> {
        if admin.deployment != self.deployment
            || admin.owner != self.owner
            || admin.epoch != self.owner_epoch
        {
            return Err(DnnError::Unauthorized(admin.owner.to_string()));
        }
        Ok(())
    }

    /// Add `address` to the eligible voter pool.
    pub fn register_voter(
        &mut self,
        admin: &AdminCapability,
        address: Address,
    ) -> Result<(), DnnError> {
        self.grant_role(admin, address, Role::Voter)
    }

    /// Grant `role` to `address`. Fails with `AlreadyRegistered` if held.
    pub fn grant_role(
        &mut self,
        admin: &AdminCapability,
        address: Address,
        role: Role,
    ) -> Result<(), DnnError> {
        self.authorize(admin)?;
        if self.has_role(&address, role) {
            return Err(DnnError::AlreadyRegistered {
                address: address.to_string(),
                role: role.to_string(),
            });
        }
        tracing::info!(%address, %role, "role granted");
        self.roles.entry(address).or_default().insert(role);
        Ok(())
    }

    /// Revoke `role` from `address`. Returns whether the role was held.
    ///
    /// Voter panels already drawn keep a revoked voter.
    pub fn revoke_role(
        &mut self,
        admin: &AdminCapability,
        address: &Address,
        role: Role,
    ) -> Result<bool, DnnError> {
        self.authorize(admin)?;
        let Some(held) = self.roles.get_mut(address) else {
            return Ok(false);
        };
        let removed = held.remove(&role);
        if held.is_empty() {
            self.roles.remove(address);
        }
        if removed {
            tracing::info!(%address, %role, "role revoked");
        }
        Ok(removed)
    }

    /// Hand ownership to `new_owner`, invalidating outstanding capabilities.
    pub fn transfer_ownership(
        &mut self,
        admin: &AdminCapability,
        new_owner: Address,
    ) -> Result<(), DnnError> {
        self.authorize(admin)?;
        tracing::info!(from = %self.owner, to = %new_owner, "ownership transferred");
        self.owner = new_owner;
        self.owner_epoch += 1;
        Ok(())
    }

    pub fn has_role(&self, address: &Address, role: Role) -> bool {
        self.roles
            .get(address)
            .is_some_and(|held| held.contains(&role))
    }

    /// All roles held by `address`, in declaration order.
    pub fn roles_of(&self, address: &Address) -> Vec<Role> {
        self.roles
            .get(address)
            .map(|held| held.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Every voter-eligible address, sorted.
    pub fn eligible_voters(&self) -> Vec<&Address> {
        self.roles
            .iter()
            .filter(|(_, held)| held.contains(&Role::Voter))
            .map(|(addr, _)| addr)
            .collect()
    }

    pub fn voter_count(&self) -> usize {
        self.roles
            .values()
            .filter(|held| held.contains(&Role::Voter))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Address {
        Address::new(format!("0x{s}"))
    }

    fn registry() -> RoleRegistry {
        RoleRegistry::new(addr("owner"), deployment_id(&addr("owner"), &BlockHash::ZERO, 0))
    }

    #[test]
    fn only_owner_gets_admin_capability() {
        let reg = registry();
        assert!(reg.is_owner(&addr("owner")));
        assert!(reg.admin(&addr("owner")).is_ok());
        assert!(matches!(
            reg.admin(&addr("mallory")),
            Err(DnnError::Unauthorized(_))
        ));
    }

    #[test]
    fn register_voter_twice_fails() {
        let mut reg = registry();
        let admin = reg.admin(&addr("owner")).unwrap();
        reg.register_voter(&admin, addr("v1")).unwrap();
        let err = reg.register_voter(&admin, addr("v1")).unwrap_err();
        assert!(matches!(err, DnnError::AlreadyRegistered { .. }));
        assert_eq!(reg.voter_count(), 1);
    }

    #[test]
    fn address_can_hold_multiple_roles() {
        let mut reg = registry();
        let admin = reg.admin(&addr("owner")).unwrap();
        reg.grant_role(&admin, addr("alice"), Role::Writer).unwrap();
        reg.grant_role(&admin, addr("alice"), Role::Reader).unwrap();
        reg.register_voter(&admin, addr("alice")).unwrap();

        assert_eq!(
            reg.roles_of(&addr("alice")),
            vec![Role::Writer, Role::Reader, Role::Voter]
        );
        assert!(!reg.has_role(&addr("alice"), Role::Publisher));
    }

    #[test]
    fn revoke_reports_whether_role_was_held() {
        let mut reg = registry();
        let admin = reg.admin(&addr("owner")).unwrap();
        reg.register_voter(&admin, addr("v1")).unwrap();

        assert!(reg.revoke_role(&admin, &addr("v1"), Role::Voter).unwrap());
        assert!(!reg.revoke_role(&admin, &addr("v1"), Role::Voter).unwrap());
        assert!(reg.eligible_voters().is_empty());
        assert!(reg.roles_of(&addr("v1")).is_empty());
    }

    #[test]
    fn eligible_voters_are_sorted() {
        let mut reg = registry();
        let admin = reg.admin(&addr("owner")).unwrap();
        for name in ["c", "a", "b"] {
            reg.register_voter(&admin, addr(name)).unwrap();
        }
        reg.grant_role(&admin, addr("w"), Role::Writer).unwrap();

        let voters: Vec<&str> = reg.eligible_voters().iter().map(|a| a.as_str()).collect();
        assert_eq!(voters, vec!["0xa", "0xb", "0xc"]);
    }

    #[test]
    fn ownership_transfer_invalidates_old_capability() {
        let mut reg = registry();
        let old = reg.admin(&addr("owner")).unwrap();
        reg.transfer_ownership(&old, addr("new")).unwrap();

        assert!(matches!(
            reg.register_voter(&old, addr("v1")),
            Err(DnnError::Unauthorized(_))
        ));
        assert!(reg.admin(&addr("owner")).is_err());
        let fresh = reg.admin(&addr("new")).unwrap();
        reg.register_voter(&fresh, addr("v1")).unwrap();
    }

    #[test]
    fn capability_from_another_deployment_is_rejected() {
        let someone = addr("someone");
        let other = RoleRegistry::new(someone.clone(), deployment_id(&someone, &BlockHash::ZERO, 0));
        let foreign = other.admin(&someone).unwrap();
        let mut reg = registry();
        assert!(matches!(
            reg.grant_role(&foreign, addr("w"), Role::Writer),
            Err(DnnError::Unauthorized(_))
        ));

        // Same owner, same epoch, different nonce.
        let twin = RoleRegistry::new(addr("owner"), deployment_id(&addr("owner"), &BlockHash::ZERO, 1));
        let twin_admin = twin.admin(&addr("owner")).unwrap();
        assert!(matches!(
            reg.register_voter(&twin_admin, addr("v1")),
            Err(DnnError::Unauthorized(_))
        ));
        assert_eq!(reg.voter_count(), 0);
    }

    #[test]
    fn deployment_id_depends_on_every_input() {
        let owner = addr("owner");
        let base = deployment_id(&owner, &BlockHash::ZERO, 0);
        assert_eq!(base, deployment_id(&owner, &BlockHash::ZERO, 0));
        assert_ne!(base, deployment_id(&owner, &BlockHash::ZERO, 1));
        assert_ne!(base, deployment_id(&owner, &BlockHash::new([1; 32]), 0));
        assert_ne!(base, deployment_id(&addr("other"), &BlockHash::ZERO, 0));
    }

    #[test]
    fn capability_survives_a_registry_round_trip() {
        let reg = registry();
        let admin = reg.admin(&addr("owner")).unwrap();
        let bytes = bincode::serialize(&reg).unwrap();
        let mut restored: RoleRegistry = bincode::deserialize(&bytes).unwrap();
        restored.register_voter(&admin, addr("v1")).unwrap();
        assert_eq!(restored.deployment(), reg.deployment());
    }
}

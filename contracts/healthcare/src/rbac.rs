//! Role registry.
//!
//! The hierarchy is flat: Admin administers every role including Admin
//! itself; no role implies another. Patient is also granted as a side
//! effect of self-registration, outside the admin path.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::errors::ContractError;

const ROLE: Symbol = symbol_short!("ROLE");

const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

/// Capability labels checked before privileged operations.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Admin = 1,
    Patient = 2,
    Doctor = 3,
    LabTech = 4,
    Pharmacy = 5,
}

fn roles_of(env: &Env, identity: &Address) -> Vec<Role> {
    env.storage()
        .persistent()
        .get(&(ROLE, identity.clone()))
        .unwrap_or(Vec::new(env))
}

fn store_roles(env: &Env, identity: &Address, roles: &Vec<Role>) {
    let key = (ROLE, identity.clone());
    env.storage().persistent().set(&key, roles);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Checks whether `identity` holds `role`.
pub fn has_role(env: &Env, identity: &Address, role: &Role) -> bool {
    roles_of(env, identity).iter().any(|r| r == *role)
}

/// Grants `role` to `identity`. Idempotent.
pub fn grant_role(env: &Env, identity: &Address, role: &Role) {
    let mut roles = roles_of(env, identity);
    if !roles.iter().any(|r| r == *role) {
        roles.push_back(role.clone());
        store_roles(env, identity, &roles);
    }
}

/// Revokes `role` from `identity`. A no-op if the role was not held.
pub fn revoke_role(env: &Env, identity: &Address, role: &Role) {
    let roles = roles_of(env, identity);
    let mut remaining = Vec::new(env);
    for r in roles.iter() {
        if r != *role {
            remaining.push_back(r);
        }
    }
    store_roles(env, identity, &remaining);
}

/// Fails with `Unauthorized` unless `identity` holds `role`.
pub fn require_role(env: &Env, identity: &Address, role: &Role) -> Result<(), ContractError> {
    if has_role(env, identity, role) {
        Ok(())
    } else {
        Err(ContractError::Unauthorized)
    }
}

/// Fails with `Unauthorized` unless `identity` holds the Admin role.
pub fn require_admin(env: &Env, identity: &Address) -> Result<(), ContractError> {
    require_role(env, identity, &Role::Admin)
}

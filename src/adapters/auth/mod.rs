//! Authentication adapters.
//!
//! `SupabaseAuthProvider` is the production implementation of the
//! `AuthProvider` port; `MockAuthProvider` backs tests.

mod mock;
mod supabase;

pub use mock::MockAuthProvider;
pub use supabase::{SupabaseAuthProvider, SupabaseConfig};

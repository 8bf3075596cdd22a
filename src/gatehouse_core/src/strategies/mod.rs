pub mod human_verifier;

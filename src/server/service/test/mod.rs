mod mfa;
mod preference;
mod server_group;

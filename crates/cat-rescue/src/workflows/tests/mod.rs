mod adoptions;
mod common;
mod notifications;

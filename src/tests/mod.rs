mod replay_tests;
mod utils;

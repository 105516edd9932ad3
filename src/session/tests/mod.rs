mod render_test;
mod run_test;

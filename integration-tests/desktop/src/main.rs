use colored::Colorize as _;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
pub struct CLIOpts {
  #[structopt(short, long)]
  /// List available tests.
  list_tests: bool,

  /// Test to run.
  test: Option<String>,
}

macro_rules! tests {
  ($($name:expr, $module:ident),*) => {
    // declare the modules for all tests
    $(
      mod $module;
    )*

    // list of all available integration tests
    const TEST_NAMES: &[&str] = &[$( $name ),*];

    // run a given test
    fn run_test(name: &str) {
      $(
        if name == $name {
          $module::fixture();
          println!("{} {}", name.green(), "passed".green());
          return;
        }
      )*

      println!("{} is not a valid test. Possible values", name.red());
      show_available_tests();
    }
  }
}

tests! {
  "uniform-roundtrip", uniform_roundtrip,
  "uniform-errors", uniform_errors,
  "program-switch", program_switch
}

fn show_available_tests() {
  for test_name in TEST_NAMES {
    println!("  -> {}", test_name.blue());
  }
}

fn main() {
  env_logger::builder()
    .filter_level(log::LevelFilter::Info)
    .parse_default_env()
    .init();
  let cli_opts = CLIOpts::from_args();

  match cli_opts.test {
    Some(ref test_name) if !cli_opts.list_tests => {
      println!("test name: {}", test_name.green());
      run_test(test_name);
    }

    _ => {
      println!("Please provide a test name. Possible values");
      show_available_tests();
    }
  }
}

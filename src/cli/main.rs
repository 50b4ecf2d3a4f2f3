use clap::{Parser, Subcommand};
use recipe_finder::client::{
    page_label, parse_ingredients, result_summary, Highlighter, HttpRecipeApi, RecipeApi,
    SearchController, SearchState, DEFAULT_PAGE_SIZE, EMPTY_RESULTS_MESSAGE, PAGE_SIZE_OPTIONS,
};
use recipe_finder::models::{MatchMode, SearchRequest};
use std::error::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[derive(Parser)]
#[command(name = "recipe-finder-cli")]
#[command(about = "Recipe Finder CLI", long_about = None)]
struct Cli {
    #[arg(short, long, env = "RECIPE_FINDER_ENDPOINT", default_value = "http://localhost:5000")]
    endpoint: String,

    /// Path of the search endpoint under the base URL
    #[arg(long, default_value = "/recipes")]
    path: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single search and print one page
    Search {
        /// Comma-separated ingredients, e.g. "tomato, onion"
        #[arg(value_name = "INGREDIENTS")]
        ingredients: String,

        /// Match recipes containing any ingredient instead of all
        #[arg(short, long)]
        any: bool,

        #[arg(short, long, default_value = "1")]
        page: u32,

        #[arg(short = 's', long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Interactive search with paging
    Browse,

    /// Check server health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let api = HttpRecipeApi::new(&cli.endpoint)?.with_path(&cli.path);

    match cli.command {
        Commands::Search {
            ingredients,
            any,
            page,
            page_size,
            json,
        } => {
            let ingredients = parse_ingredients(&ingredients);
            if ingredients.is_empty() {
                eprintln!("Enter at least one ingredient");
                std::process::exit(2);
            }

            let request = SearchRequest {
                ingredients,
                action: if any { MatchMode::Any } else { MatchMode::All },
                page: page.max(1),
                page_size: page_size.max(1),
            };

            let recipes = api.search(&request).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&recipes)?);
            } else {
                let state = SearchState {
                    page: request.page,
                    page_size: request.page_size,
                    last_action: request.action,
                    results: recipes,
                    searched_ingredients: request.ingredients,
                    ..Default::default()
                };
                print_state(&state);
            }
        }

        Commands::Browse => browse(api).await?,

        Commands::Health => {
            let body = api.health().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}

async fn browse(api: HttpRecipeApi) -> Result<(), Box<dyn Error>> {
    let mut controller = SearchController::new(api);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    println!("Recipe Finder");
    println!("=============");
    print_help();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                print_help();
                continue;
            }
            "set" => {
                controller.set_input(rest);
                println!("Ingredients: {}", parse_ingredients(rest).join(", "));
                continue;
            }
            "all" | "any" => {
                if !rest.is_empty() {
                    controller.set_input(rest);
                }
                let action = if command == "any" { MatchMode::Any } else { MatchMode::All };
                controller.search(action, 1).await;
            }
            "next" => {
                controller.next().await;
            }
            "prev" => {
                if !controller.can_prev() {
                    println!("Already on the first page");
                    continue;
                }
                controller.prev().await;
            }
            "size" => match rest.trim().parse::<u32>() {
                Ok(size) if PAGE_SIZE_OPTIONS.contains(&size) => {
                    controller.set_page_size(size).await;
                }
                _ => {
                    println!("Page size must be one of {:?}", PAGE_SIZE_OPTIONS);
                    continue;
                }
            },
            other => {
                println!("Unknown command '{}', type 'help'", other);
                continue;
            }
        }

        let state = controller.state();
        if let Some(error) = &state.last_error {
            eprintln!("Error: {}", error);
        }
        print_state(state);
    }

    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  set <ingredients>   set the comma-separated ingredient list");
    println!("  all [ingredients]   search recipes containing every ingredient");
    println!("  any [ingredients]   search recipes containing at least one ingredient");
    println!("  next | prev         move between pages");
    println!("  size <n>            page size, one of {:?}", PAGE_SIZE_OPTIONS);
    println!("  quit");
}

fn print_state(state: &SearchState) {
    let highlighter = Highlighter::ansi();

    match result_summary(state.results.len()) {
        Some(summary) => println!("{}", summary),
        None => println!("{}", EMPTY_RESULTS_MESSAGE),
    }
    println!();

    for recipe in &state.results {
        println!("{}", recipe.name);
        if let Some(description) = recipe.description.as_deref().filter(|d| !d.is_empty()) {
            println!("  {}", description);
        }
        println!(
            "  Ingredients: {}",
            highlighter.highlight(recipe.ingredient_text(), &state.searched_ingredients)
        );
        println!(
            "  Instructions: {}",
            highlighter.highlight(recipe.instruction_text(), &state.searched_ingredients)
        );
        println!();
    }

    println!(
        "{} ({} per page, match {})",
        page_label(state.page),
        state.page_size,
        state.last_action
    );
}

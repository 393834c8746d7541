use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input};
use dotenvy::dotenv;

use classhub_cli::{describe_role, parse_role_arg};
use classhub_db::{MIGRATOR, PgPool, PgStore, UserStore, init_db_pool};
use classhub_models::{InsertOutcome, NewUser, UserRole};

#[derive(Parser)]
#[command(name = "classhub-cli")]
#[command(about = "Classhub CLI - Administrative tools for Classhub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Set or clear the role of a user
    SetRole {
        /// Email address of the user (prompted if not provided)
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// instructor, admin or none
        #[arg(short = 'r', long)]
        role: String,

        /// Register the user first if they do not exist yet
        #[arg(long)]
        create: bool,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// List registered users
    ListUsers {
        /// Only show users with this role
        #[arg(short = 'r', long)]
        role: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("❌ DATABASE_URL must be set");
        std::process::exit(1);
    };

    let pool = match init_db_pool(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Migrate => handle_migrate(&pool).await,
        Commands::SetRole {
            email,
            role,
            create,
            yes,
        } => handle_set_role(pool, email, &role, create, yes).await,
        Commands::ListUsers { role } => handle_list_users(pool, role.as_deref()).await,
    };

    if let Err(e) = result {
        eprintln!("\n❌ {}", e);
        std::process::exit(1);
    }
}

async fn handle_migrate(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    MIGRATOR.run(pool).await?;
    println!("✅ Migrations applied");
    Ok(())
}

async fn handle_set_role(
    pool: PgPool,
    email: Option<String>,
    role: &str,
    create: bool,
    yes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let role = parse_role_arg(role)?;

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let store = PgStore::new(pool);

    let user = match store.find_user_by_email(&email).await? {
        Some(user) => user,
        None if create => {
            let outcome = store
                .insert_user(NewUser {
                    email: email.clone(),
                    name: None,
                    photo_url: None,
                    profile: serde_json::json!({}),
                })
                .await?;
            if let InsertOutcome::Inserted(id) = outcome {
                println!("Registered {} ({})", email, id);
            }
            store
                .find_user_by_email(&email)
                .await?
                .ok_or("User disappeared after registration")?
        }
        None => return Err(format!("No user registered with email {}", email).into()),
    };

    if role == Some(UserRole::Admin) && !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Grant admin to {}?", email))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted");
            return Ok(());
        }
    }

    store.update_user_role(user.id, role).await?;

    println!("\n✅ Role updated");
    println!("   Email: {}", email);
    println!(
        "   Role: {} -> {}",
        describe_role(user.role),
        describe_role(role)
    );
    Ok(())
}

async fn handle_list_users(
    pool: PgPool,
    role: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let role = match role {
        Some(value) => parse_role_arg(value)?,
        None => None,
    };

    let store = PgStore::new(pool);
    let users = store.list_users(role).await?;

    for user in &users {
        println!(
            "{}  {:<40} {}",
            user.id,
            user.email,
            describe_role(user.role)
        );
    }
    println!("\n{} user(s)", users.len());
    Ok(())
}

//! Command Line Interface for the staking pool yield engine.
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use prettytable::{Table, row};
use rust_decimal::Decimal;
use stake_yield_data::overview::load_resolver;
use stake_yield_data::prelude::{PairState, SnapshotProvider, StakingDataProvider, build_overview};
use stake_yield_domain::prelude::{
    CurrencyAmount, Fraction, PoolDraft, PoolUid, SECONDS_IN_WEEK, StakingInfoMapper, Token, TokenRegistry,
    YieldCalculator, derive_stake_input, max_amount_spend, parse_raw_units,
};
use stake_yield_pricing::prelude::{PricedAsset, UsdPriceResolver};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;

use config::{AppConfig, ENV_SNAPSHOT};

#[derive(Parser)]
#[command(name = "stake-yield")]
#[command(about = "Staking pool APY, reward rate and USD price inspector", long_about = None)]
struct Cli {
    /// Chain snapshot to read (defaults to STAKE_YIELD_SNAPSHOT)
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every pool with its APY, rates, taxes and USD figures
    Pools,
    /// Quote a token or LP share in the stablecoin
    Price {
        /// Token symbol or address
        token: String,

        /// Quote against this token instead of the stablecoin
        #[arg(long)]
        versus: Option<String>,
    },
    /// Preview a new pool before creating it
    Draft {
        /// Staked token symbol or address
        #[arg(long)]
        staked: String,

        /// Reward token symbol or address
        #[arg(long)]
        reward: String,

        /// Total reward budget, in whole reward tokens
        #[arg(long)]
        amount: String,

        /// Pool lifespan in days
        #[arg(long)]
        days: u64,

        /// Minimum stake per user, in whole staked tokens
        #[arg(long, default_value = "0")]
        min_stake: String,

        /// Minimum total stake for full rewards, in whole staked tokens
        #[arg(long)]
        min_total: String,

        /// Minimum number of stakers for full rewards
        #[arg(long)]
        min_stakers: u64,

        /// Stake tax in basis points
        #[arg(long, default_value_t = 0)]
        stake_tax_bps: u32,

        /// Unstake tax in basis points
        #[arg(long, default_value_t = 0)]
        unstake_tax_bps: u32,

        /// Reward tax in basis points
        #[arg(long, default_value_t = 0)]
        reward_tax_bps: u32,
    },
    /// Check a stake amount against a pool and an account balance
    Stake {
        /// Pool uid, e.g. v2-3
        pool: String,

        /// Amount to stake, in whole tokens, or `max` for the whole balance
        amount: String,

        /// Account balance in whole tokens; omit when no account is connected
        #[arg(long)]
        balance: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    let path = cli
        .snapshot
        .clone()
        .or(config.snapshot.clone())
        .ok_or_else(|| anyhow!("No snapshot given; pass --snapshot or set {ENV_SNAPSHOT}"))?;
    let provider = SnapshotProvider::from_path(&path).await?;
    let calculator = YieldCalculator::new(config.constants);
    debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Pools => {
            let overview = build_overview(&provider, calculator, config.resolver).await?;

            println!(
                "📦 Block {} on chain {} ({})",
                overview.block.number,
                overview.block.chain_id,
                overview.block.timestamp.format("%Y-%m-%d %H:%M UTC")
            );

            let mut table = Table::new();
            table.set_titles(row![
                "Pool", "Stake", "Earn", "APY", "USD APY", "TVL (USD)", "Divider", "Weekly", "Taxes", "Open"
            ]);
            for pool in &overview.pools {
                let info = &pool.info;
                let weekly = info
                    .weekly_total_rewards()
                    .and_then(|w| w.to_exact(2))
                    .unwrap_or_else(|_| "-".into());
                let tvl = pool
                    .valuation
                    .tvl_usd
                    .as_ref()
                    .and_then(|v| v.to_exact(2).ok())
                    .unwrap_or_else(|| "-".into());
                table.add_row(row![
                    info.pool_uid,
                    info.staked_token.symbol,
                    info.reward_token.symbol,
                    format_percent(&info.apy),
                    pool.valuation.usd_apy.as_ref().map_or_else(|| "-".into(), format_percent),
                    tvl,
                    info.reward_divider.to_fixed(2),
                    weekly,
                    format!("{} / {} / {}", info.staking_tax, info.unstaking_tax, info.retrieving_tax),
                    if info.open { "yes" } else { "no" }
                ]);
            }
            table.printstd();

            for (uid, reason) in &overview.rejected {
                println!("⚠️  {uid} rejected: {reason}");
            }
            for uid in &overview.skipped {
                println!("⚠️  {uid} skipped: token metadata missing");
            }

            let mut reward_tokens: Vec<&Token> = Vec::new();
            for pool in &overview.pools {
                if !reward_tokens.contains(&&pool.info.reward_token) {
                    reward_tokens.push(&pool.info.reward_token);
                }
            }
            for token in reward_tokens {
                let unclaimed = overview.total_unclaimed(token)?;
                if !unclaimed.is_zero() {
                    println!("💰 Unclaimed: {unclaimed}");
                }
            }
        }
        Commands::Price { token, versus } => {
            let registry = provider.tokens().await?;
            let (resolver, pairs) = load_resolver(&provider, config.resolver).await?;

            let asset = resolve_asset(&token, &registry, &pairs)?;
            match versus {
                Some(other) => {
                    let other = resolve_asset(&other, &registry, &pairs)?;
                    match resolver.price_ratio(&asset, &other) {
                        Some(price) => println!("💱 {price}"),
                        None => println!("❌ No route for {} or {}", asset.token(), other.token()),
                    }
                }
                None => print_usd_price(&resolver, &asset)?,
            }
        }
        Commands::Draft {
            staked,
            reward,
            amount,
            days,
            min_stake,
            min_total,
            min_stakers,
            stake_tax_bps,
            unstake_tax_bps,
            reward_tax_bps,
        } => {
            let registry = provider.tokens().await?;
            let staked = lookup_token(&staked, &registry)?;
            let reward = lookup_token(&reward, &registry)?;

            let mut draft = PoolDraft::new(staked.clone(), reward.clone(), parse_amount(&amount, &reward)?, days);
            draft.min_user_stake = parse_amount(&min_stake, &staked)?;
            draft.min_total_stake = parse_amount(&min_total, &staked)?;
            draft.min_stakers = min_stakers;
            draft.stake_tax_bps = stake_tax_bps;
            draft.unstake_tax_bps = unstake_tax_bps;
            draft.unstake_reward_tax_bps = reward_tax_bps;

            let per_day = draft
                .tokens_per_day()
                .ok_or_else(|| anyhow!("Pool lifespan must be at least one day"))?;
            let apy = draft.preview_apy(&calculator)?;

            println!("🧪 Pool draft: stake {} earn {}", staked.symbol, reward.symbol);
            println!("   Rewards per day: {per_day}");
            println!("   Starting APY:    {}", format_percent(&apy));
        }
        Commands::Stake { pool, amount, balance } => {
            let uid: PoolUid = pool.parse().map_err(|e| anyhow!("{e}"))?;
            let registry = provider.tokens().await?;
            let record = provider
                .pool_records()
                .await?
                .into_iter()
                .find(|r| r.uid == uid)
                .ok_or_else(|| anyhow!("Pool {uid} not found"))?;
            let info = StakingInfoMapper::new(calculator)
                .map(&record, &registry)?
                .ok_or_else(|| anyhow!("Pool {uid} tokens have no metadata"))?;

            let balance = balance
                .as_deref()
                .map(|typed| parse_amount(typed, &info.staked_token))
                .transpose()?;
            let amount = match &balance {
                Some(balance) if amount.eq_ignore_ascii_case("max") => {
                    max_amount_spend(balance, 0u64).to_exact(u32::from(balance.token.decimals))?
                }
                _ => amount,
            };
            match derive_stake_input(&amount, &info.staked_token, balance.as_ref(), balance.is_some()) {
                Ok(parsed) => {
                    println!("✅ Stake {parsed} into {uid}");
                    if parsed.raw < info.minimum_to_stake.raw {
                        println!("   Below the {} minimum for rewards", info.minimum_to_stake);
                    }
                    let after_tax = parsed.multiply(&Fraction::one().checked_sub(&info.staking_tax.as_fraction())?)?;
                    println!("   Staked after {} tax: {after_tax}", info.staking_tax);
                    let rate = info.hypothetical_reward_rate(&after_tax)?;
                    println!("   Weekly rewards: {}", rate.multiply(&Fraction::from_integer(SECONDS_IN_WEEK))?);
                }
                Err(e) => println!("❌ {e}"),
            }
        }
    }

    Ok(())
}

fn lookup_token(query: &str, registry: &TokenRegistry) -> Result<Token> {
    registry
        .get(query)
        .or_else(|| registry.find_symbol(query))
        .cloned()
        .ok_or_else(|| anyhow!("Unknown token `{query}`"))
}

/// A token, or an LP share when `query` names a pair's liquidity token.
fn resolve_asset(
    query: &str,
    registry: &TokenRegistry,
    pairs: &[PairState],
) -> Result<PricedAsset> {
    let lp = pairs.iter().find(|p| {
        p.pair.liquidity_token().address.eq_ignore_ascii_case(query)
            || p.pair.liquidity_token().symbol.eq_ignore_ascii_case(query)
    });
    if let Some(state) = lp {
        return Ok(PricedAsset::PairShare {
            pair: state.pair.clone(),
            total_supply: state.total_supply,
        });
    }
    Ok(PricedAsset::Token(lookup_token(query, registry)?))
}

fn print_usd_price(resolver: &UsdPriceResolver, asset: &PricedAsset) -> Result<()> {
    let Some(price) = resolver.asset_usd_price(asset) else {
        println!("❌ No route from {} to {}", asset.token(), resolver.stablecoin());
        return Ok(());
    };
    println!("💵 1 {} = {} {}", asset.token(), price.adjusted()?.to_fixed(6), resolver.stablecoin());
    if let PricedAsset::Token(token) = asset
        && let Some(trade) = resolver.best_trade(token)?
    {
        println!("   Route: {}", trade.route);
    }
    Ok(())
}

/// Parses a flag amount; unlike the stake input, zero is allowed.
fn parse_amount(typed: &str, token: &Token) -> Result<CurrencyAmount> {
    parse_raw_units(typed, token).with_context(|| format!("Invalid {} amount `{typed}`", token.symbol))
}

fn percent_decimal(value: &Fraction) -> Option<Decimal> {
    value.to_decimal(2).ok()
}

/// APY as a percentage with two decimals.
fn format_percent(value: &Fraction) -> String {
    match percent_decimal(value) {
        Some(d) => format!("{d}%"),
        None => format!("{}%", value.to_fixed(2)),
    }
}

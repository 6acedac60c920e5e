// SPDX-License-Identifier: MPL-2.0
//! Command-line demo driving the global store on a tokio `LocalSet`.

use std::rc::Rc;
use std::time::Duration;

use tokio::task::LocalSet;
use toast_store::config;
use toast_store::notifications::{global, NotificationStore, Toast, ToastPayload};
use toast_store::time::{SystemClock, TokioTimer};
use tracing_subscriber::EnvFilter;

struct Flags {
    title: String,
    description: Option<String>,
    delay_ms: Option<u64>,
    count: usize,
}

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    let flags = Flags {
        title: args
            .opt_value_from_str("--title")?
            .unwrap_or_else(|| "Saved".to_string()),
        description: args.opt_value_from_str("--description")?,
        delay_ms: args.opt_value_from_str("--delay-ms")?,
        count: args.opt_value_from_str("--count")?.unwrap_or(1),
    };
    let rest = args.finish();
    if !rest.is_empty() {
        tracing::warn!(?rest, "ignoring unrecognized arguments");
    }
    Ok(flags)
}

fn print_toasts(toasts: &[Toast]) {
    println!("-- {} active", toasts.len());
    for toast in toasts {
        println!(
            "   [{}] {} {}",
            if toast.is_open() { "open" } else { "hidden" },
            toast.title().unwrap_or("<untitled>"),
            toast.description().unwrap_or_default(),
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let flags = parse_flags()?;

    let (settings, warning) = config::load();
    if let Some(warning) = warning {
        tracing::warn!(%warning, "using default settings");
    }
    let mut store_config = settings.store_config();
    if let Some(delay_ms) = flags.delay_ms {
        store_config = store_config.with_removal_delay_ms(delay_ms);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let local = Rc::new(LocalSet::new());
    let store = NotificationStore::new(
        store_config,
        Rc::new(SystemClock),
        Rc::new(TokioTimer::new(Rc::clone(&local))),
    );
    global::install(store);

    runtime.block_on(local.run_until(async move {
        let subscription = global::subscribe(print_toasts);

        for index in 0..flags.count {
            let mut payload = ToastPayload::new().title(format!("{} #{}", flags.title, index + 1));
            if let Some(description) = &flags.description {
                payload = payload.description(description.clone());
            }
            global::toast(payload);
        }

        global::dismiss_all();
        tokio::time::sleep(store_config.removal_delay.as_duration() + Duration::from_millis(50))
            .await;

        subscription.unsubscribe();
    }));

    global::uninstall();
    Ok(())
}

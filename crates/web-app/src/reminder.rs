use std::future::Future;

use chrono::{Duration, Local};
use gloo_timers::future::TimeoutFuture;
use log::debug;

use growmuscle_domain::WorkoutTime;

/// Call `remind` every day at `workout_time`, starting with the next occurrence.
///
/// The loop never ends by itself. Dropping the future cancels the pending timer.
pub async fn run<F, Fut>(workout_time: WorkoutTime, mut remind: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    loop {
        let delay = workout_time.duration_until(Local::now().naive_local());
        debug!("next workout reminder at {workout_time} in {delay}");
        TimeoutFuture::new(timeout_millis(delay)).await;
        remind().await;
        // Ensure the next occurrence lies on the following day.
        TimeoutFuture::new(MIN_REARM_MILLIS).await;
    }
}

const MIN_REARM_MILLIS: u32 = 1_000;

fn timeout_millis(delay: Duration) -> u32 {
    u32::try_from(delay.num_milliseconds().max(0)).unwrap_or(u32::MAX)
}

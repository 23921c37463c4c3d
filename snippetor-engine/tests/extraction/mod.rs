mod scenarios;
mod snapshots;

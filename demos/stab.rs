use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::time::Instant;

use clap::{Arg, Command};
use fnv::FnvHashMap;
use stabtree::{Interval, IntervalTree};

type GenericError = Box<dyn Error>;

// Split a tab separated line into its first field and the remaining numbers.
fn parse_line(line: &str) -> Result<(&str, Vec<i64>), GenericError> {
    let mut fields = line.trim_end().split('\t');
    let name = fields.next().unwrap_or("");
    let numbers = fields
        .map(|field| field.parse::<i64>())
        .collect::<Result<Vec<i64>, _>>()?;
    Ok((name, numbers))
}

// Group `name start end` rows by name. Blank lines are skipped.
fn read_interval_rows<R: BufRead>(rdr: R) -> Result<FnvHashMap<String, Vec<Interval>>, GenericError> {
    let mut intervals = FnvHashMap::<String, Vec<Interval>>::default();

    for (line_number, line) in rdr.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let (name, numbers) = parse_line(&line)?;
        if numbers.len() < 2 {
            return Err(format!("line {}: expected name, start, end", line_number + 1).into());
        }

        let name_intervals = intervals.entry(name.to_string()).or_default();
        let key = name_intervals.len() as i64;
        name_intervals.push(Interval::normalized(numbers[0], numbers[1], key));
    }

    Ok(intervals)
}

// Read `name start end` rows into one tree per name.
fn read_intervals(path: &str) -> Result<FnvHashMap<String, IntervalTree>, GenericError> {
    let now = Instant::now();

    let intervals = read_interval_rows(BufReader::new(File::open(path)?))?;
    let line_count: usize = intervals.values().map(|rows| rows.len()).sum();

    eprintln!("reading intervals: {}s", now.elapsed().as_millis() as f64 / 1000.0);
    eprintln!("lines: {}", line_count);
    eprintln!("names: {}", intervals.len());

    let now = Instant::now();
    let mut trees = FnvHashMap::<String, IntervalTree>::default();
    for (name, name_intervals) in intervals {
        trees.insert(name, IntervalTree::try_new(name_intervals)?);
    }
    eprintln!("building trees: {}s", now.elapsed().as_millis() as f64 / 1000.0);

    Ok(trees)
}

// Print every `name point` row of `points_path` with its number of hits.
fn query_points(intervals_path: &str, points_path: &str) -> Result<(), GenericError> {
    let trees = read_intervals(intervals_path)?;

    let rdr = BufReader::new(File::open(points_path)?);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let mut total_count: usize = 0;
    let now = Instant::now();

    for line in rdr.lines() {
        let line = line?;
        let (name, numbers) = parse_line(&line)?;
        let point = match numbers.first() {
            Some(point) => *point,
            None => continue,
        };

        let count = trees.get(name).map_or(0, |tree| tree.query_count(point));
        writeln!(out, "{}\t{}", line.trim_end(), count)?;
        total_count += count;
    }
    out.flush()?;

    eprintln!("stabbing: {}s", now.elapsed().as_millis() as f64 / 1000.0);
    eprintln!("total hits: {}", total_count);

    Ok(())
}

fn main() -> Result<(), GenericError> {
    let matches = Command::new("stab")
        .about("Count the intervals containing each query point")
        .arg(
            Arg::new("intervals")
                .help("tab separated `name start end` rows")
                .required(true),
        )
        .arg(
            Arg::new("points")
                .help("tab separated `name point` rows")
                .required(true),
        )
        .get_matches();

    let intervals_path = matches
        .get_one::<String>("intervals")
        .ok_or("missing intervals file")?;
    let points_path = matches
        .get_one::<String>("points")
        .ok_or("missing points file")?;

    query_points(intervals_path, points_path)
}

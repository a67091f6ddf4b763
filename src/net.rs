// src/net.rs

// HTTP/1.0 over TCP (std-only). GET for portal pages and the version file,
// POST for the backend sync endpoint.

use std::{
    io::{Read, Write},
    net::TcpStream,
    time::Duration,
};

pub fn http_get(host: &str, path: &str) -> Result<String, Box<dyn std::error::Error>> {
    let req = format!(
        "GET {} HTTP/1.0\r\nHost: {}\r\nUser-Agent: acad_scrape/0.3\r\nConnection: close\r\n\r\n",
        path, host
    );
    exchange(host, &req)
}

pub fn http_post_json(
    host: &str,
    path: &str,
    body: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let req = format!(
        "POST {} HTTP/1.0\r\nHost: {}\r\nUser-Agent: acad_scrape/0.3\r\n\
         Content-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        path,
        host,
        body.len(),
        body
    );
    exchange(host, &req)
}

fn exchange(host: &str, req: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut s = TcpStream::connect((host, 80))?;
    s.set_read_timeout(Some(Duration::from_secs(15)))?;
    s.set_write_timeout(Some(Duration::from_secs(15)))?;

    s.write_all(req.as_bytes())?;
    s.flush()?;

    let mut buf = Vec::new();
    s.read_to_end(&mut buf)?;
    let resp = String::from_utf8_lossy(&buf);

    let status = resp.split("\r\n").next().unwrap_or("");
    if !status.contains("200") {
        return Err(format!("HTTP error: {} {}", status, host).into());
    }
    let body_idx = resp.find("\r\n\r\n").ok_or("Malformed HTTP response")? + 4;
    Ok(resp[body_idx..].to_string())
}

